use crate::error::ExtractError;

/// Extracts face embedding vectors from an encoded image.
///
/// The input is a raw image file (PNG, JPEG, ...); the output is zero
/// or more dense f32 vectors, one per detected face, in detection
/// order. All vectors from one extractor share the dimensionality
/// returned by [`FaceExtractor::dimension`].
///
/// # Thread Safety
///
/// Implementations must be safe for concurrent use.
pub trait FaceExtractor: Send + Sync {
    /// Computes face embeddings from an encoded image.
    ///
    /// Returns an empty vector when the image decodes but contains no
    /// detectable face. Undecodable bytes fail with
    /// [`ExtractError::InvalidImage`].
    fn extract(&self, image: &[u8]) -> Result<Vec<Vec<f32>>, ExtractError>;

    /// Returns the dimensionality of the embedding vectors (e.g., 128).
    fn dimension(&self) -> usize;
}
