use image::DynamicImage;

use crate::error::ExtractError;

/// Decodes an image from raw bytes, sniffing the format from content.
///
/// Bytes that cannot be decoded as a supported image format are a
/// client-input failure, reported as [`ExtractError::InvalidImage`].
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, ExtractError> {
    image::load_from_memory(bytes).map_err(|e| ExtractError::InvalidImage(e.to_string()))
}
