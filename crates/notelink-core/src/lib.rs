//! # Notelink Core
//!
//! Domain layer for the notelink similarity-graph engine.
//!
//! This crate defines the types and abstractions shared by the rest of the
//! workspace:
//! - **Domain types**: documents, similarity results, candidate edges,
//!   approvals, and applied edges
//! - **Configuration**: the per-scan [`LinkerConfig`] value
//! - **Error taxonomy**: extraction, configuration, and approval errors
//! - **Traits**: [`DocumentStore`] and [`EmbeddingProvider`] boundaries
//!
//! ## Dependency Inversion
//!
//! Infrastructure crates (`notelink-embed`, `notelink-index`,
//! `notelink-pipeline`) depend on this crate, never the other way around.
//! The host application supplies a [`DocumentStore`]; the engine supplies
//! everything downstream of it.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::LinkerConfig;
pub use error::{ApprovalError, ConfigError, ExtractionError};
pub use traits::{DocumentStore, EmbeddingProvider};
pub use types::{
    ApprovalState, CandidateEdge, Document, Edge, EdgeKey, PendingApproval, SimilarityResult,
};
