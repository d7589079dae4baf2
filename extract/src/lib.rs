//! Face embedding extraction boundary.
//!
//! [`FaceExtractor`] is the seam between the gallery service and
//! whatever turns pixels into embeddings. The service treats extraction
//! as opaque: an encoded image goes in, zero or more fixed-length
//! vectors come out, one per detected face, in detection order.
//!
//! The crate ships the shared image validation contract
//! ([`decode_image`]) and a deterministic development extractor
//! ([`GridExtractor`]); real face models implement [`FaceExtractor`]
//! behind the same seam.

mod decode;
mod error;
mod extractor;
mod grid;

pub use decode::decode_image;
pub use error::ExtractError;
pub use extractor::FaceExtractor;
pub use grid::{GridExtractor, DEFAULT_GRID};
