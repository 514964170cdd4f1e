//! # Notelink Embed
//!
//! [`EmbeddingProvider`] implementations for the notelink engine:
//!
//! - [`HashEmbedder`]: a deterministic, model-free feature-hashing extractor.
//!   No network, no weights, identical input always yields the identical
//!   vector. The default provider when no external embedding service is
//!   configured.
//! - [`StaticEmbedder`]: a table-driven test double that maps exact texts to
//!   preset vectors and can be scripted to fail.
//!
//! Hosts with access to a real embedding model implement
//! [`EmbeddingProvider`] themselves; the engine only sees the trait.

pub mod hashed;
pub mod mock;

pub use hashed::HashEmbedder;
pub use mock::StaticEmbedder;

// Re-export the trait so providers can be used without importing core
pub use notelink_core::EmbeddingProvider;
