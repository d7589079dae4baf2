use crate::distance::euclidean_distance;
use crate::error::GalleryError;
use crate::gallery::GalleryEntry;

/// Identity reported by transport layers when no gallery entry is
/// close enough.
pub const UNKNOWN_IDENTITY: &str = "UNKNOWN";

/// Default maximum L2 distance for an accepted match.
/// Lower = stricter (more unknowns), higher = more lenient.
pub const DEFAULT_TOLERANCE: f32 = 0.6;

/// Outcome of classifying one query embedding against a gallery
/// snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult {
    /// The nearest entry was within tolerance.
    Match {
        /// Identity of the nearest entry.
        identity: String,

        /// `1 - distance`, clamped to `[0, 1]`.
        confidence: f32,
    },

    /// No entry was close enough, or the gallery is empty.
    ///
    /// A policy outcome, not a failure. The near-miss distance is not
    /// reported: rejected queries always read as confidence 0.
    Unknown,
}

impl MatchResult {
    /// Returns true for an accepted match.
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match { .. })
    }

    /// Returns the matched identity, or `None` for [`MatchResult::Unknown`].
    pub fn identity(&self) -> Option<&str> {
        match self {
            Self::Match { identity, .. } => Some(identity),
            Self::Unknown => None,
        }
    }

    /// Returns the match confidence. Always 0 for [`MatchResult::Unknown`].
    pub fn confidence(&self) -> f32 {
        match self {
            Self::Match { confidence, .. } => *confidence,
            Self::Unknown => 0.0,
        }
    }

    /// Returns the identity to report on the wire: the matched identity,
    /// or [`UNKNOWN_IDENTITY`].
    pub fn label(&self) -> &str {
        self.identity().unwrap_or(UNKNOWN_IDENTITY)
    }
}

/// Classifies one query embedding against a gallery snapshot.
///
/// Scans every entry, takes the minimum L2 distance, and accepts the
/// match only when that distance is within `tolerance`. The threshold
/// is a hard cutoff, not a soft weighting. Ties on the exact minimum
/// resolve to the earliest-registered entry. An empty gallery is
/// immediately [`MatchResult::Unknown`], with no comparisons performed.
///
/// Accepted matches report `1 - distance` clamped to `[0, 1]` (a
/// distance above 1 must not read as negative confidence).
///
/// Returns [`GalleryError::DimensionMismatch`] when the query length
/// differs from any scanned entry. A snapshot taken from `Gallery`
/// always has uniform dimensionality, but snapshots can also be
/// assembled by callers, so the engine validates every entry itself.
pub fn classify(
    query: &[f32],
    gallery: &[GalleryEntry],
    tolerance: f32,
) -> Result<MatchResult, GalleryError> {
    if gallery.is_empty() {
        return Ok(MatchResult::Unknown);
    }

    let mut best_dist = f32::INFINITY;
    let mut best_idx = 0usize;
    for (i, entry) in gallery.iter().enumerate() {
        if entry.embedding.len() != query.len() {
            return Err(GalleryError::DimensionMismatch {
                expected: entry.embedding.len(),
                got: query.len(),
            });
        }
        let dist = euclidean_distance(query, &entry.embedding);
        // Strict inequality keeps the earliest entry on exact ties.
        if dist < best_dist {
            best_dist = dist;
            best_idx = i;
        }
    }

    if best_dist <= tolerance {
        Ok(MatchResult::Match {
            identity: gallery[best_idx].identity.clone(),
            confidence: (1.0 - best_dist).clamp(0.0, 1.0),
        })
    } else {
        Ok(MatchResult::Unknown)
    }
}

/// Classifies every query against the same gallery snapshot.
///
/// Results are ordered as the input queries (detection order when the
/// queries come from one image). Any validation failure is terminal for
/// the whole batch; partial results are never returned.
pub fn classify_batch(
    queries: &[Vec<f32>],
    gallery: &[GalleryEntry],
    tolerance: f32,
) -> Result<Vec<MatchResult>, GalleryError> {
    queries
        .iter()
        .map(|q| classify(q, gallery, tolerance))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(identity: &str, embedding: &[f32]) -> GalleryEntry {
        GalleryEntry {
            identity: identity.to_string(),
            embedding: embedding.to_vec(),
        }
    }

    fn two_person_gallery() -> Vec<GalleryEntry> {
        vec![
            entry("alice", &[1.0, 0.0, 0.0]),
            entry("bob", &[0.0, 1.0, 0.0]),
        ]
    }

    #[test]
    fn empty_gallery_is_unknown() {
        let result = classify(&[1.0, 2.0, 3.0], &[], DEFAULT_TOLERANCE).unwrap();
        assert_eq!(result, MatchResult::Unknown);
        assert_eq!(result.confidence(), 0.0);
        assert_eq!(result.label(), UNKNOWN_IDENTITY);
    }

    #[test]
    fn empty_gallery_skips_validation() {
        // The empty-gallery short circuit comes before any length check.
        let result = classify(&[], &[], DEFAULT_TOLERANCE).unwrap();
        assert_eq!(result, MatchResult::Unknown);
    }

    #[test]
    fn exact_match_has_full_confidence() {
        let gallery = two_person_gallery();
        let result = classify(&[0.0, 1.0, 0.0], &gallery, DEFAULT_TOLERANCE).unwrap();
        assert_eq!(result.identity(), Some("bob"));
        assert_eq!(result.confidence(), 1.0);
    }

    #[test]
    fn nearest_within_tolerance_is_accepted() {
        let gallery = two_person_gallery();
        // Distance to alice = sqrt(0.02) ~ 0.141, to bob ~ 1.28.
        let result = classify(&[0.9, 0.1, 0.0], &gallery, DEFAULT_TOLERANCE).unwrap();
        assert_eq!(result.identity(), Some("alice"));
        let conf = result.confidence();
        assert!((conf - 0.858_579).abs() < 1e-3, "confidence: got {conf}");
    }

    #[test]
    fn nearest_beyond_tolerance_is_unknown() {
        let gallery = two_person_gallery();
        // Nearest distance is sqrt(2) ~ 1.41 > 0.6.
        let result = classify(&[0.0, 0.0, 1.0], &gallery, DEFAULT_TOLERANCE).unwrap();
        assert_eq!(result, MatchResult::Unknown);
    }

    #[test]
    fn boundary_distance_is_accepted() {
        // distance == tolerance passes the `<=` test.
        let gallery = vec![entry("edge", &[0.5, 0.0])];
        let result = classify(&[0.0, 0.0], &gallery, 0.5).unwrap();
        assert_eq!(result.identity(), Some("edge"));
    }

    #[test]
    fn tie_break_picks_earliest_registered() {
        let gallery = vec![
            entry("first", &[1.0, 0.0]),
            entry("second", &[1.0, 0.0]),
            entry("third", &[1.0, 0.0]),
        ];
        for _ in 0..10 {
            let result = classify(&[1.0, 0.0], &gallery, DEFAULT_TOLERANCE).unwrap();
            assert_eq!(result.identity(), Some("first"));
        }
    }

    #[test]
    fn raising_tolerance_never_revokes_a_match() {
        let gallery = two_person_gallery();
        let query = [0.9, 0.1, 0.0]; // distance ~ 0.141 to alice

        let mut accepted = false;
        for tolerance in [0.05, 0.1, 0.2, 0.6, 1.0, 2.0] {
            let matched = classify(&query, &gallery, tolerance).unwrap().is_match();
            assert!(
                matched || !accepted,
                "match lost when tolerance rose to {tolerance}"
            );
            accepted = accepted || matched;
        }
        assert!(accepted, "query should match at some tolerance");
    }

    #[test]
    fn confidence_clamped_to_zero_for_distant_matches() {
        // Nearest distance ~ 1.42 is accepted under tolerance 5 but
        // 1 - d is negative; confidence floors at 0.
        let gallery = two_person_gallery();
        let far = classify(&[-0.9, -0.1, 0.0], &gallery, 5.0).unwrap();
        assert!(far.is_match());
        assert_eq!(far.confidence(), 0.0);
    }

    #[test]
    fn confidence_always_within_unit_interval() {
        let gallery = two_person_gallery();
        let queries = [
            [1.0, 0.0, 0.0],
            [0.9, 0.1, 0.0],
            [0.0, 0.0, 1.0],
            [-3.0, 2.0, 0.5],
        ];
        for q in &queries {
            let result = classify(q, &gallery, 10.0).unwrap();
            let conf = result.confidence();
            assert!((0.0..=1.0).contains(&conf), "confidence out of range: {conf}");
        }
    }

    #[test]
    fn dimension_mismatch_is_an_error_not_unknown() {
        let gallery = two_person_gallery();
        let err = classify(&[1.0, 0.0], &gallery, DEFAULT_TOLERANCE).unwrap_err();
        assert!(matches!(
            err,
            GalleryError::DimensionMismatch {
                expected: 3,
                got: 2
            }
        ));
    }

    #[test]
    fn mixed_dimension_snapshot_is_rejected() {
        // Hand-assembled snapshots may be malformed; every scanned
        // entry is validated, not just the first.
        let gallery = vec![entry("ok", &[1.0, 0.0]), entry("bad", &[1.0, 0.0, 0.0])];
        let err = classify(&[1.0, 0.0], &gallery, DEFAULT_TOLERANCE).unwrap_err();
        assert!(matches!(
            err,
            GalleryError::DimensionMismatch {
                expected: 3,
                got: 2
            }
        ));
    }

    #[test]
    fn batch_results_align_with_query_order() {
        let gallery = two_person_gallery();
        let queries = vec![
            vec![0.0, 0.0, 1.0],
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
        ];
        let results = classify_batch(&queries, &gallery, DEFAULT_TOLERANCE).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], MatchResult::Unknown);
        assert_eq!(results[1].identity(), Some("alice"));
        assert_eq!(results[2].identity(), Some("bob"));
    }

    #[test]
    fn batch_error_is_terminal() {
        let gallery = two_person_gallery();
        let queries = vec![vec![1.0, 0.0, 0.0], vec![1.0, 0.0]];
        assert!(classify_batch(&queries, &gallery, DEFAULT_TOLERANCE).is_err());
    }

    #[test]
    fn batch_on_empty_input_is_empty() {
        let gallery = two_person_gallery();
        let results = classify_batch(&[], &gallery, DEFAULT_TOLERANCE).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn label_for_match_is_identity() {
        let result = MatchResult::Match {
            identity: "alice".to_string(),
            confidence: 0.9,
        };
        assert_eq!(result.label(), "alice");
        assert!(result.is_match());
    }
}
