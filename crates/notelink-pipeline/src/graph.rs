//! Link graph mutation
//!
//! Applied edges are undirected and keyed by their canonical pair, so
//! `apply("A", "B")` and `apply("B", "A")` address the same edge. Applying
//! an existing edge is a successful no-op, which makes `apply` safe to
//! retry.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use notelink_core::{Edge, EdgeKey};

/// Outcome of applying an edge.
///
/// `AlreadyConnected` is not an error: the caller gets the existing edge and
/// the graph is unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// The edge did not exist and was created
    Created(Edge),

    /// The canonical pair was already connected; the stored edge is returned
    AlreadyConnected(Edge),
}

impl ApplyOutcome {
    /// The stored edge, whether fresh or pre-existing
    pub fn edge(&self) -> &Edge {
        match self {
            ApplyOutcome::Created(edge) | ApplyOutcome::AlreadyConnected(edge) => edge,
        }
    }

    /// Whether this application created the edge
    pub fn is_created(&self) -> bool {
        matches!(self, ApplyOutcome::Created(_))
    }
}

/// Undirected link graph with canonical-pair uniqueness.
#[derive(Debug, Default)]
pub struct LinkGraph {
    edges: RwLock<HashMap<EdgeKey, Edge>>,
}

impl LinkGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an edge between two documents.
    ///
    /// Canonicalizes the pair before the existence check; at most one edge
    /// per pair ever exists, and repeat applications return the stored edge.
    pub fn apply(&self, a: &str, b: &str) -> ApplyOutcome {
        let key = EdgeKey::new(a, b);
        let mut edges = self.edges.write();
        if let Some(existing) = edges.get(&key) {
            return ApplyOutcome::AlreadyConnected(existing.clone());
        }

        let edge = Edge::new(key.clone());
        edges.insert(key, edge.clone());
        debug!(first = edge.key.first(), second = edge.key.second(), "edge created");
        ApplyOutcome::Created(edge)
    }

    /// Remove every edge touching a document, returning the removed edges.
    ///
    /// Called from the document-deleted hook so the graph never holds
    /// dangling references.
    pub fn remove_all(&self, document_id: &str) -> Vec<Edge> {
        let mut edges = self.edges.write();
        let doomed: Vec<EdgeKey> = edges
            .keys()
            .filter(|key| key.touches(document_id))
            .cloned()
            .collect();

        let removed: Vec<Edge> = doomed
            .iter()
            .filter_map(|key| edges.remove(key))
            .collect();
        debug!(id = document_id, count = removed.len(), "removed edges for document");
        removed
    }

    /// Whether the canonical pair is connected
    pub fn contains(&self, key: &EdgeKey) -> bool {
        self.edges.read().contains_key(key)
    }

    /// All edges, ordered by canonical key for stable output
    pub fn edges(&self) -> Vec<Edge> {
        let mut all: Vec<Edge> = self.edges.read().values().cloned().collect();
        all.sort_by(|a, b| a.key.cmp(&b.key));
        all
    }

    /// Edges touching one document, ordered by canonical key
    pub fn edges_for(&self, document_id: &str) -> Vec<Edge> {
        let mut touching: Vec<Edge> = self
            .edges
            .read()
            .values()
            .filter(|edge| edge.key.touches(document_id))
            .cloned()
            .collect();
        touching.sort_by(|a, b| a.key.cmp(&b.key));
        touching
    }

    /// Seed the graph from host-persisted edges
    pub fn load(&self, edges: Vec<Edge>) {
        let mut map = self.edges.write();
        for edge in edges {
            map.entry(edge.key.clone()).or_insert(edge);
        }
    }

    /// Number of stored edges
    pub fn len(&self) -> usize {
        self.edges.read().len()
    }

    /// Whether the graph has no edges
    pub fn is_empty(&self) -> bool {
        self.edges.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_creates_then_recognizes_existing() {
        let graph = LinkGraph::new();
        assert!(graph.apply("a", "b").is_created());
        assert!(!graph.apply("a", "b").is_created());
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn apply_is_idempotent_under_argument_order() {
        let graph = LinkGraph::new();
        let first = graph.apply("a", "b");
        let second = graph.apply("b", "a");

        assert!(first.is_created());
        match second {
            ApplyOutcome::AlreadyConnected(edge) => assert_eq!(&edge, first.edge()),
            other => panic!("expected AlreadyConnected, got {other:?}"),
        }
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn remove_all_clears_every_touching_edge() {
        let graph = LinkGraph::new();
        graph.apply("a", "b");
        graph.apply("b", "c");
        graph.apply("c", "d");

        let removed = graph.remove_all("b");
        assert_eq!(removed.len(), 2);
        assert_eq!(graph.len(), 1);
        assert!(graph.edges_for("b").is_empty());
        assert!(graph.edges_for("a").is_empty());
        assert_eq!(graph.edges_for("c").len(), 1);
    }

    #[test]
    fn remove_all_on_untouched_document_is_a_no_op() {
        let graph = LinkGraph::new();
        graph.apply("a", "b");
        assert!(graph.remove_all("z").is_empty());
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn edges_are_ordered_by_canonical_key() {
        let graph = LinkGraph::new();
        graph.apply("c", "d");
        graph.apply("b", "a");

        let keys: Vec<(String, String)> = graph
            .edges()
            .into_iter()
            .map(|e| (e.key.first().to_string(), e.key.second().to_string()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("a".to_string(), "b".to_string()),
                ("c".to_string(), "d".to_string()),
            ]
        );
    }

    #[test]
    fn load_seeds_without_duplicating() {
        let graph = LinkGraph::new();
        let edge = Edge::new(EdgeKey::new("a", "b"));
        graph.load(vec![edge.clone(), Edge::new(EdgeKey::new("b", "a"))]);

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.edges()[0], edge);
    }
}
