//! Exact linear-scan similarity index

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use notelink_core::SimilarityResult;

use crate::cosine::cosine_similarity;

/// In-memory map from document id to embedding vector.
///
/// All mutation goes through [`upsert`](Self::upsert) and
/// [`remove`](Self::remove), which exclude queries at vector granularity: a
/// query never observes a half-written vector, and a removed id is never
/// returned by a query issued after `remove` returns. Partial population is
/// fine; a cancelled scan leaves the index consistent and queryable, and
/// re-scanning is idempotent because `upsert` replaces by id.
#[derive(Debug, Default)]
pub struct SimilarityIndex {
    vectors: RwLock<HashMap<String, Vec<f32>>>,
}

impl SimilarityIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a document's vector
    pub fn upsert(&self, id: impl Into<String>, vector: Vec<f32>) {
        let id = id.into();
        debug!(id = %id, dims = vector.len(), "upserting vector");
        self.vectors.write().insert(id, vector);
    }

    /// Remove a document from the index; returns whether it was present
    pub fn remove(&self, id: &str) -> bool {
        self.vectors.write().remove(id).is_some()
    }

    /// Clone of the stored vector for a document, if indexed
    pub fn vector(&self, id: &str) -> Option<Vec<f32>> {
        self.vectors.read().get(id).cloned()
    }

    /// Whether a document is indexed
    pub fn contains(&self, id: &str) -> bool {
        self.vectors.read().contains_key(id)
    }

    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.vectors.read().len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.vectors.read().is_empty()
    }

    /// Drop every vector
    pub fn clear(&self) {
        self.vectors.write().clear();
    }

    /// Top-k documents most similar to `vector`, excluding `source_id`.
    ///
    /// Results carry `source_id` as their source, include only scores
    /// `>= threshold`, and are ordered by score descending with ties broken
    /// by ascending target id. Returns an empty vec (never an error) when
    /// nothing qualifies or `k` is 0.
    pub fn query(
        &self,
        source_id: &str,
        vector: &[f32],
        k: usize,
        threshold: f32,
    ) -> Vec<SimilarityResult> {
        if k == 0 {
            return Vec::new();
        }

        let vectors = self.vectors.read();
        let mut results: Vec<SimilarityResult> = vectors
            .iter()
            .filter(|(id, _)| id.as_str() != source_id)
            .filter_map(|(id, candidate)| {
                let score = cosine_similarity(vector, candidate);
                (score >= threshold).then(|| SimilarityResult {
                    source_id: source_id.to_string(),
                    target_id: id.clone(),
                    score,
                })
            })
            .collect();
        drop(vectors);

        // Scores are clamped to [0, 1] so the partial order is total here
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.target_id.cmp(&b.target_id))
        });
        results.truncate(k);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_with(entries: &[(&str, &[f32])]) -> SimilarityIndex {
        let index = SimilarityIndex::new();
        for (id, vector) in entries {
            index.upsert(*id, vector.to_vec());
        }
        index
    }

    #[test]
    fn query_orders_by_score_descending() {
        let index = index_with(&[
            ("far", &[0.0, 1.0]),
            ("near", &[1.0, 0.1]),
            ("exact", &[1.0, 0.0]),
        ]);

        let results = index.query("q", &[1.0, 0.0], 10, 0.0);
        let ids: Vec<&str> = results.iter().map(|r| r.target_id.as_str()).collect();
        assert_eq!(ids, vec!["exact", "near", "far"]);
    }

    #[test]
    fn query_breaks_ties_by_ascending_id() {
        let index = index_with(&[
            ("beta", &[1.0, 0.0]),
            ("alpha", &[1.0, 0.0]),
            ("gamma", &[1.0, 0.0]),
        ]);

        let results = index.query("q", &[1.0, 0.0], 10, 0.0);
        let ids: Vec<&str> = results.iter().map(|r| r.target_id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn query_excludes_the_source_document() {
        let index = index_with(&[("self", &[1.0, 0.0]), ("other", &[1.0, 0.0])]);

        let results = index.query("self", &[1.0, 0.0], 10, 0.0);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].target_id, "other");
        assert_eq!(results[0].source_id, "self");
    }

    #[test]
    fn query_applies_threshold() {
        let index = index_with(&[("close", &[1.0, 0.05]), ("far", &[0.3, 1.0])]);

        let results = index.query("q", &[1.0, 0.0], 10, 0.9);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].target_id, "close");
    }

    #[test]
    fn query_truncates_to_k() {
        let index = index_with(&[
            ("a", &[1.0, 0.0]),
            ("b", &[1.0, 0.1]),
            ("c", &[1.0, 0.2]),
        ]);

        assert_eq!(index.query("q", &[1.0, 0.0], 2, 0.0).len(), 2);
        assert!(index.query("q", &[1.0, 0.0], 0, 0.0).is_empty());
    }

    #[test]
    fn query_on_empty_index_returns_empty() {
        let index = SimilarityIndex::new();
        assert!(index.query("q", &[1.0, 0.0], 5, 0.0).is_empty());
    }

    #[test]
    fn zero_query_vector_matches_nothing_above_zero_threshold() {
        let index = index_with(&[("a", &[1.0, 0.0])]);
        // Zero-vector fallback documents never clear a positive threshold
        assert!(index.query("q", &[0.0, 0.0], 5, 0.1).is_empty());
    }

    #[test]
    fn upsert_replaces_by_id() {
        let index = SimilarityIndex::new();
        index.upsert("a", vec![1.0, 0.0]);
        index.upsert("a", vec![0.0, 1.0]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.vector("a"), Some(vec![0.0, 1.0]));
    }

    #[test]
    fn removed_id_is_not_observed_by_later_queries() {
        let index = index_with(&[("a", &[1.0, 0.0]), ("b", &[1.0, 0.0])]);
        assert!(index.remove("a"));
        assert!(!index.remove("a"));

        let results = index.query("q", &[1.0, 0.0], 10, 0.0);
        assert!(results.iter().all(|r| r.target_id != "a"));
        assert!(!index.contains("a"));
    }
}
