//! # Notelink Index
//!
//! In-memory similarity index: a map from document id to embedding vector
//! answering "k most similar documents above threshold T" queries.
//!
//! The baseline is an exact linear scan, which is the correctness reference
//! for small corpora (a few thousand notes). The [`SimilarityIndex`] surface
//! (`upsert`/`remove`/`query`) is deliberately narrow so an approximate
//! nearest-neighbour backend can replace the scan without touching callers.

pub mod cosine;
pub mod index;

pub use cosine::cosine_similarity;
pub use index::SimilarityIndex;
