//! Scan reporting

use std::time::Duration;

/// Summary of one corpus scan.
///
/// Per-document extraction failures are aggregated here rather than aborting
/// the scan; a cancelled scan returns the partial report with `cancelled`
/// set.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Documents whose vectors were (re)indexed
    pub documents_scanned: usize,

    /// Documents that fell back to the zero vector, with the error text
    pub extraction_failures: Vec<(String, String)>,

    /// Candidate edges produced by selection (deduplicated by pair)
    pub candidates: usize,

    /// Edges applied immediately because manual approval was off
    pub auto_applied: usize,

    /// Candidates waiting in the approval gate
    pub pending: usize,

    /// Whether the scan was cancelled before completing
    pub cancelled: bool,

    /// Wall-clock scan duration
    pub duration: Duration,
}

impl ScanReport {
    /// Whether every document embedded cleanly
    pub fn is_clean(&self) -> bool {
        self.extraction_failures.is_empty()
    }
}
