use image::imageops::{self, FilterType};

use crate::decode::decode_image;
use crate::error::ExtractError;
use crate::extractor::FaceExtractor;

/// Default grid side length; embedding dimensionality is the square.
pub const DEFAULT_GRID: u32 = 8;

/// Deterministic development extractor.
///
/// The image is grayscaled, downscaled to an N×N grid of cells, and the
/// cell luminances (scaled to `[0, 1]`) are L2-normalized into a single
/// embedding. This is a whole-image signature, not a face model: it
/// always yields exactly one embedding per decodable image and never
/// separates multiple faces. Real deployments implement
/// [`FaceExtractor`] with an actual face model; wiring and tests run on
/// this one.
pub struct GridExtractor {
    grid: u32,
}

impl GridExtractor {
    /// Creates an extractor with the given grid side length.
    /// Embedding dimensionality is `grid * grid`. Panics if `grid` is 0.
    pub fn new(grid: u32) -> Self {
        assert!(grid > 0, "extract: grid side must be positive");
        Self { grid }
    }
}

impl Default for GridExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_GRID)
    }
}

impl FaceExtractor for GridExtractor {
    fn extract(&self, image: &[u8]) -> Result<Vec<Vec<f32>>, ExtractError> {
        let img = decode_image(image)?;
        let gray = img.to_luma8();
        let cells = imageops::resize(&gray, self.grid, self.grid, FilterType::Triangle);

        let mut emb: Vec<f32> = cells
            .into_raw()
            .into_iter()
            .map(|p| p as f32 / 255.0)
            .collect();
        l2_normalize(&mut emb);
        Ok(vec![emb])
    }

    fn dimension(&self) -> usize {
        (self.grid * self.grid) as usize
    }
}

/// Normalizes a vector to unit length in-place.
fn l2_normalize(v: &mut [f32]) {
    let mut sum: f64 = 0.0;
    for &x in v.iter() {
        sum += (x as f64) * (x as f64);
    }
    let norm = sum.sqrt();
    if norm > 0.0 {
        let scale = (1.0 / norm) as f32;
        for x in v.iter_mut() {
            *x *= scale;
        }
    }
}
