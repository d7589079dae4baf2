/// Compute the Euclidean (L2) distance between two vectors.
///
/// Both slices must have the same length; callers validate dimensions
/// before comparing. Uses f64 intermediate precision.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    let mut sum: f64 = 0.0;
    for i in 0..a.len() {
        let d = a[i] as f64 - b[i] as f64;
        sum += d * d;
    }
    sum.sqrt() as f32
}
