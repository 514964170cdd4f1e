//! Connection selection policy
//!
//! Turns raw similarity results into a bounded, deterministically ordered
//! candidate list. This is a pure function: no state, no randomness, same
//! inputs always produce the same output.

use notelink_core::{CandidateEdge, ConfigError, SimilarityResult};

/// Select up to `limit` candidate edges for one source document.
///
/// Filters `raw` to `score >= threshold`, orders by score descending with
/// ties broken by ascending target id, truncates to `limit`, and assigns
/// ranks from 0. A `limit` of 0 yields an empty list. A threshold outside
/// [0, 1] is a configuration error.
pub fn select(
    source_id: &str,
    raw: Vec<SimilarityResult>,
    threshold: f32,
    limit: usize,
) -> Result<Vec<CandidateEdge>, ConfigError> {
    if !threshold.is_finite() {
        return Err(ConfigError::ThresholdNotFinite);
    }
    if !(0.0..=1.0).contains(&threshold) {
        return Err(ConfigError::ThresholdOutOfRange(threshold));
    }
    if limit == 0 {
        return Ok(Vec::new());
    }

    let mut qualifying: Vec<SimilarityResult> = raw
        .into_iter()
        .filter(|r| r.score >= threshold && r.target_id != source_id)
        .collect();

    qualifying.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.target_id.cmp(&b.target_id))
    });
    qualifying.truncate(limit);

    Ok(qualifying
        .into_iter()
        .enumerate()
        .map(|(rank, r)| CandidateEdge {
            source_id: source_id.to_string(),
            target_id: r.target_id,
            score: r.score,
            rank,
        })
        .collect())
}
