//! In-memory face gallery and nearest-match classification.
//!
//! The gallery holds registered `(identity, embedding)` pairs; the
//! matcher classifies a query embedding against a gallery snapshot by
//! Euclidean (L2) distance with a hard acceptance threshold.
//!
//! # Usage
//!
//! ```
//! use faceid_gallery::{classify, Gallery, DEFAULT_TOLERANCE};
//!
//! let gallery = Gallery::new();
//! gallery.register("alice", &[1.0, 0.0, 0.0]).unwrap();
//!
//! let snapshot = gallery.snapshot();
//! let result = classify(&[0.9, 0.1, 0.0], &snapshot, DEFAULT_TOLERANCE).unwrap();
//! assert_eq!(result.identity(), Some("alice"));
//! ```
//!
//! # Design
//!
//! [`classify`] is pure and stateless: it runs against an immutable
//! snapshot copied out of the store, so registrations racing a lookup
//! never corrupt a result. A lookup sees exactly the entries present
//! when its snapshot was taken. [`MatchResult::Unknown`] is a policy
//! outcome (nothing close enough, or an empty gallery), strictly
//! distinct from validation errors such as
//! [`GalleryError::DimensionMismatch`].

mod distance;
mod error;
mod gallery;
mod matcher;

pub use distance::euclidean_distance;
pub use error::GalleryError;
pub use gallery::{Gallery, GalleryEntry};
pub use matcher::{classify, classify_batch, MatchResult, DEFAULT_TOLERANCE, UNKNOWN_IDENTITY};
