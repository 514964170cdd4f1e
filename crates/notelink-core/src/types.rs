//! Domain types for the similarity-graph pipeline
//!
//! These types flow through the pipeline in order: a [`Document`] is embedded,
//! the index produces [`SimilarityResult`]s, the selector turns them into
//! [`CandidateEdge`]s, the approval gate wraps them in [`PendingApproval`]s,
//! and the link graph stores applied [`Edge`]s keyed by [`EdgeKey`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A document supplied by the host's corpus.
///
/// Text is immutable for the duration of a scan; the cached vector lives in
/// the similarity index, not on the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier within the corpus
    pub id: String,

    /// Raw text content
    pub text: String,
}

impl Document {
    /// Create a new document
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// One similarity hit from an index query.
///
/// Ephemeral: produced per query, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// The document the query was issued for
    pub source_id: String,

    /// The matched document
    pub target_id: String,

    /// Cosine similarity in [0, 1]
    pub score: f32,
}

/// A proposed connection between two documents.
///
/// Invariant: for a given `source_id`, at most `connection_limit` candidates
/// exist per scan, all with `score >= similarity_threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateEdge {
    /// The document the candidates were selected for
    pub source_id: String,

    /// The proposed link target
    pub target_id: String,

    /// Cosine similarity in [0, 1]
    pub score: f32,

    /// Position after tie-break ordering within the source's candidate list
    pub rank: usize,
}

impl CandidateEdge {
    /// Canonical key for the pair this candidate proposes to connect
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(&self.source_id, &self.target_id)
    }
}

/// Lifecycle state of a candidate edge in the approval gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalState {
    /// Awaiting a human decision
    Pending,

    /// Accepted by the user (terminal)
    Approved,

    /// Declined by the user (terminal)
    Rejected,

    /// Applied without human review because manual approval was off (terminal)
    AutoApplied,
}

impl ApprovalState {
    /// Terminal states admit no further transitions
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ApprovalState::Pending)
    }
}

/// A candidate edge tracked by the approval gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingApproval {
    /// Ledger id used by `decide`
    pub id: Uuid,

    /// The proposed edge
    pub edge: CandidateEdge,

    /// Current lifecycle state
    pub state: ApprovalState,
}

impl PendingApproval {
    /// Create a new approval entry in the given initial state
    pub fn new(edge: CandidateEdge, state: ApprovalState) -> Self {
        Self {
            id: Uuid::new_v4(),
            edge,
            state,
        }
    }
}

/// Canonical identity of an undirected edge.
///
/// The two document ids are stored in lexicographic order so `(A, B)` and
/// `(B, A)` produce the same key. This is what makes `apply` idempotent
/// regardless of argument order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    first: String,
    second: String,
}

impl EdgeKey {
    /// Build a key, canonicalizing the pair ordering
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let a = a.into();
        let b = b.into();
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    /// Lexicographically smaller endpoint
    pub fn first(&self) -> &str {
        &self.first
    }

    /// Lexicographically larger endpoint
    pub fn second(&self) -> &str {
        &self.second
    }

    /// Whether either endpoint is the given document
    pub fn touches(&self, document_id: &str) -> bool {
        self.first == document_id || self.second == document_id
    }

    /// The endpoint opposite to `document_id`, if the key touches it
    pub fn other(&self, document_id: &str) -> Option<&str> {
        if self.first == document_id {
            Some(&self.second)
        } else if self.second == document_id {
            Some(&self.first)
        } else {
            None
        }
    }
}

/// An applied link between two documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Canonical pair identity
    pub key: EdgeKey,

    /// When the edge was applied
    pub created_at: DateTime<Utc>,
}

impl Edge {
    /// Create an edge stamped with the current time
    pub fn new(key: EdgeKey) -> Self {
        Self {
            key,
            created_at: Utc::now(),
        }
    }
}
