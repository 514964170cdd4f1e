//! Error taxonomy for the similarity-graph engine
//!
//! Failures are scoped to the component that produced them. Extraction
//! failures are recovered per document (zero-vector fallback), configuration
//! errors abort the invocation before any work happens, and approval errors
//! are surfaced to the caller without touching engine state.

use thiserror::Error;
use uuid::Uuid;

use crate::types::ApprovalState;

/// Errors from feature extraction.
///
/// Extraction never aborts a scan: the engine falls back to a zero vector
/// for the failing document, logs the error, and records it in the scan
/// report.
#[derive(Error, Debug, Clone)]
pub enum ExtractionError {
    #[error("text could not be parsed: {0}")]
    Unparseable(String),

    #[error("embedding provider error: {0}")]
    Provider(String),

    #[error("provider returned a {actual}-dimensional vector, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Invalid configuration, rejected before a scan runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("similarity threshold {0} is outside [0, 1]")]
    ThresholdOutOfRange(f32),

    #[error("similarity threshold must be a finite number")]
    ThresholdNotFinite,
}

/// Misuse of the approval gate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApprovalError {
    #[error("no approval with id {0}")]
    NotFound(Uuid),

    #[error("approval {id} was already decided ({state:?})")]
    AlreadyDecided { id: Uuid, state: ApprovalState },
}
