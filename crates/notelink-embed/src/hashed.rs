//! Feature-hashing bag-of-words extractor
//!
//! Tokenizes text into lowercase alphanumeric runs, hashes each token into a
//! fixed number of buckets (FNV-1a, stable across platforms and releases),
//! accumulates counts, and L2-normalizes the result. Two texts sharing
//! vocabulary land in the same buckets and score high under cosine
//! similarity.
//!
//! This is the correctness baseline, not a semantic model: it captures
//! lexical overlap only. Hosts wanting true semantic similarity plug in a
//! model-backed [`EmbeddingProvider`].

use async_trait::async_trait;
use tracing::debug;

use notelink_core::{EmbeddingProvider, ExtractionError};

/// Deterministic local embedding provider based on feature hashing.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    /// Default bucket count; plenty for note-sized vocabularies
    pub const DEFAULT_DIMENSIONS: usize = 256;

    /// Create an embedder with the given number of buckets.
    ///
    /// A dimension count of 0 is clamped to the default.
    pub fn new(dimensions: usize) -> Self {
        let dimensions = if dimensions == 0 {
            debug!("dimension count 0 requested, using default");
            Self::DEFAULT_DIMENSIONS
        } else {
            dimensions
        };
        Self { dimensions }
    }

    /// Synchronous embedding; the trait impl delegates here.
    ///
    /// Token-free text (empty, whitespace, punctuation-only) yields the zero
    /// vector so callers stay total.
    pub fn embed_sync(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        let mut token_count = 0usize;

        for token in tokenize(text) {
            let bucket = (fnv1a(token.as_bytes()) % self.dimensions as u64) as usize;
            vector[bucket] += 1.0;
            token_count += 1;
        }

        if token_count == 0 {
            return vector;
        }

        l2_normalize(&mut vector);
        vector
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DIMENSIONS)
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ExtractionError> {
        Ok(self.embed_sync(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashed-bow"
    }
}

/// Lowercased alphanumeric runs; everything else is a separator.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

/// FNV-1a, 64-bit. Hand-rolled so bucket assignment is stable across
/// platforms and std releases, which the determinism contract requires.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET_BASIS;
    for &byte in bytes {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

fn l2_normalize(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm != 0.0 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_input_yields_identical_vector() {
        let embedder = HashEmbedder::default();
        let a = embedder.embed_sync("cats are great");
        let b = embedder.embed_sync("cats are great");
        assert_eq!(a, b);
    }

    #[test]
    fn empty_text_yields_zero_vector() {
        let embedder = HashEmbedder::default();
        for text in ["", "   ", "\n\t", "!!! --- ..."] {
            let vector = embedder.embed_sync(text);
            assert_eq!(vector.len(), HashEmbedder::DEFAULT_DIMENSIONS);
            assert!(vector.iter().all(|&v| v == 0.0), "text {text:?}");
        }
    }

    #[test]
    fn non_empty_text_is_unit_length() {
        let embedder = HashEmbedder::default();
        let vector = embedder.embed_sync("the stock market rose today");
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn tokenization_is_case_and_punctuation_insensitive() {
        let embedder = HashEmbedder::default();
        assert_eq!(
            embedder.embed_sync("Cats, are GREAT!"),
            embedder.embed_sync("cats are great")
        );
    }

    #[test]
    fn zero_dimensions_falls_back_to_default() {
        let embedder = HashEmbedder::new(0);
        assert_eq!(
            EmbeddingProvider::dimensions(&embedder),
            HashEmbedder::DEFAULT_DIMENSIONS
        );
    }

    #[test]
    fn fnv1a_known_values() {
        // Reference values for the 64-bit FNV-1a test vectors
        assert_eq!(fnv1a(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a(b"a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[tokio::test]
    async fn trait_impl_matches_sync_path() {
        let embedder = HashEmbedder::new(64);
        let via_trait = embedder.embed("overlapping vocabulary").await.unwrap();
        assert_eq!(via_trait, embedder.embed_sync("overlapping vocabulary"));
    }
}
