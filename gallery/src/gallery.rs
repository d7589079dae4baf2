use std::sync::RwLock;

use crate::error::GalleryError;
use crate::matcher::{classify_batch, MatchResult};

/// A registered face: caller-supplied identity plus its embedding.
///
/// Entries are never mutated or removed once registered. The gallery is
/// a multiset, not a map: one identity may appear with several
/// embeddings (multiple enrolled photos per person).
#[derive(Debug, Clone)]
pub struct GalleryEntry {
    /// Opaque caller-supplied token (e.g. a student identifier).
    pub identity: String,

    /// Fixed-length face embedding.
    pub embedding: Vec<f32>,
}

/// In-memory store of registered face embeddings.
///
/// Append-only for the process lifetime: no update, removal, or
/// persistence across restarts. A single reader-writer lock guards the
/// entry list. [`Gallery::register`] appends under the write lock;
/// [`Gallery::snapshot`] copies entries out under the read lock, so the
/// matching computation itself never runs with the lock held.
///
/// Thread-safe: all methods can be called concurrently.
pub struct Gallery {
    entries: RwLock<Vec<GalleryEntry>>,
}

impl Gallery {
    /// Creates an empty gallery.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Registers an embedding for `identity`.
    ///
    /// The first registration establishes the gallery's dimensionality;
    /// later embeddings must match it. Registration is all-or-nothing:
    /// a rejected embedding leaves the gallery unchanged.
    pub fn register(&self, identity: &str, embedding: &[f32]) -> Result<(), GalleryError> {
        if embedding.is_empty() {
            return Err(GalleryError::EmptyEmbedding);
        }

        // The dimension check and the append hold the same write lock;
        // a racing first registration cannot land between them.
        let mut entries = self.entries.write().unwrap();
        if let Some(first) = entries.first() {
            if first.embedding.len() != embedding.len() {
                return Err(GalleryError::DimensionMismatch {
                    expected: first.embedding.len(),
                    got: embedding.len(),
                });
            }
        }
        entries.push(GalleryEntry {
            identity: identity.to_string(),
            embedding: embedding.to_vec(),
        });
        Ok(())
    }

    /// Returns a point-in-time copy of all entries in registration order.
    ///
    /// Registrations that happen after the copy is taken are not
    /// reflected, and an in-progress append is never observed halfway.
    pub fn snapshot(&self) -> Vec<GalleryEntry> {
        self.entries.read().unwrap().clone()
    }

    /// Returns the number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Returns true if no entries are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the established embedding dimensionality, or `None`
    /// while the gallery is empty.
    pub fn dimension(&self) -> Option<usize> {
        self.entries
            .read()
            .unwrap()
            .first()
            .map(|e| e.embedding.len())
    }

    /// Classifies each query embedding against one consistent snapshot.
    ///
    /// The snapshot is taken once per call, not once per query, so all
    /// faces from one image are judged against the same gallery state
    /// even while registrations race. Results are ordered as the input
    /// queries.
    pub fn recognize(
        &self,
        queries: &[Vec<f32>],
        tolerance: f32,
    ) -> Result<Vec<MatchResult>, GalleryError> {
        let entries = self.snapshot();
        classify_batch(queries, &entries, tolerance)
    }
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new()
    }
}
