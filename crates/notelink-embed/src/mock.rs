//! Table-driven embedding provider for tests
//!
//! Maps exact texts to preset vectors so scenario tests can pin down the
//! similarity structure of a corpus without depending on any extraction
//! algorithm. Unknown texts either fall back to the zero vector or, when
//! `fail_on_unknown` is set, produce an [`ExtractionError`] to exercise the
//! engine's per-document recovery path.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use notelink_core::{EmbeddingProvider, ExtractionError};

/// Embedding provider backed by a fixed text-to-vector table.
pub struct StaticEmbedder {
    vectors: RwLock<HashMap<String, Vec<f32>>>,
    dimensions: usize,
    fail_on_unknown: bool,
}

impl StaticEmbedder {
    /// Create an empty table for vectors of the given length
    pub fn new(dimensions: usize) -> Self {
        Self {
            vectors: RwLock::new(HashMap::new()),
            dimensions,
            fail_on_unknown: false,
        }
    }

    /// Error on texts missing from the table instead of returning zeros
    pub fn fail_on_unknown(mut self) -> Self {
        self.fail_on_unknown = true;
        self
    }

    /// Register the vector returned for an exact text
    pub fn insert(&self, text: impl Into<String>, vector: Vec<f32>) {
        debug_assert_eq!(vector.len(), self.dimensions);
        self.vectors.write().insert(text.into(), vector);
    }

    /// Builder-style registration for test setup
    pub fn with_vector(self, text: impl Into<String>, vector: Vec<f32>) -> Self {
        self.insert(text, vector);
        self
    }
}

#[async_trait]
impl EmbeddingProvider for StaticEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ExtractionError> {
        if let Some(vector) = self.vectors.read().get(text) {
            return Ok(vector.clone());
        }
        if self.fail_on_unknown {
            return Err(ExtractionError::Provider(format!(
                "no vector registered for text ({} chars)",
                text.len()
            )));
        }
        Ok(self.zero_vector())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "static"
    }
}
