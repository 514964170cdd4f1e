//! Boundary traits
//!
//! The engine consumes documents through [`DocumentStore`] and produces
//! vectors through [`EmbeddingProvider`]. Both are trait objects so hosts
//! and providers can be swapped without touching the pipeline.

use anyhow::Result;
use async_trait::async_trait;

use crate::error::ExtractionError;
use crate::types::Document;

/// Read-only corpus access, implemented by the host application.
///
/// Enumeration order is irrelevant; the pipeline orders its own output.
/// Deletion is signalled by the host calling the engine's
/// `on_document_deleted` rather than through this trait.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Enumerate every document in the corpus
    async fn list_documents(&self) -> Result<Vec<Document>>;
}

/// Converts text into a fixed-length vector.
///
/// Implementations must be deterministic: identical input always yields the
/// identical vector. Empty or token-free text yields the zero vector rather
/// than an error so downstream code stays total; [`ExtractionError`] is
/// reserved for genuine provider failures (network, bad model output), which
/// the engine recovers from per document.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ExtractionError>;

    /// Length of the vectors this provider produces
    fn dimensions(&self) -> usize;

    /// Human-readable provider name, used in logs
    fn name(&self) -> &str;

    /// The all-zeroes fallback vector for this provider's dimensionality
    fn zero_vector(&self) -> Vec<f32> {
        vec![0.0; self.dimensions()]
    }
}
