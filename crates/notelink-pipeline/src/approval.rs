//! Approval gate
//!
//! A ledger of candidate edges awaiting (or past) a human decision. Each
//! entry is a small state machine: `Pending` may move to `Approved` or
//! `Rejected` once; `AutoApplied` entries are terminal from the start.

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::debug;
use uuid::Uuid;

use notelink_core::{ApprovalError, ApprovalState, CandidateEdge, EdgeKey, PendingApproval};

/// Ledger of candidate-edge approvals.
#[derive(Debug, Default)]
pub struct ApprovalGate {
    ledger: DashMap<Uuid, PendingApproval>,
    // Submission order, so `pending()` lists approvals the way they arrived
    order: Mutex<Vec<Uuid>>,
}

impl ApprovalGate {
    /// Create an empty gate
    pub fn new() -> Self {
        Self::default()
    }

    /// Register candidates, returning their ledger entries in input order.
    ///
    /// With `manual_approval` false every entry starts (and ends) in
    /// `AutoApplied`; otherwise entries start `Pending` and wait for
    /// [`decide`](Self::decide).
    pub fn submit(
        &self,
        candidates: Vec<CandidateEdge>,
        manual_approval: bool,
    ) -> Vec<PendingApproval> {
        let initial_state = if manual_approval {
            ApprovalState::Pending
        } else {
            ApprovalState::AutoApplied
        };

        let mut order = self.order.lock();
        candidates
            .into_iter()
            .map(|edge| {
                let approval = PendingApproval::new(edge, initial_state);
                debug!(id = %approval.id, state = ?approval.state, "submitted candidate");
                self.ledger.insert(approval.id, approval.clone());
                order.push(approval.id);
                approval
            })
            .collect()
    }

    /// Decide a pending approval.
    ///
    /// `accept` moves `Pending` to `Approved`, otherwise to `Rejected`.
    /// Unknown ids fail with `NotFound`; entries already in a terminal state
    /// fail with `AlreadyDecided`.
    pub fn decide(&self, id: Uuid, accept: bool) -> Result<PendingApproval, ApprovalError> {
        let mut entry = self.ledger.get_mut(&id).ok_or(ApprovalError::NotFound(id))?;
        if entry.state.is_terminal() {
            return Err(ApprovalError::AlreadyDecided {
                id,
                state: entry.state,
            });
        }

        entry.state = if accept {
            ApprovalState::Approved
        } else {
            ApprovalState::Rejected
        };
        debug!(id = %id, state = ?entry.state, "approval decided");
        Ok(entry.clone())
    }

    /// Look up a ledger entry
    pub fn get(&self, id: Uuid) -> Option<PendingApproval> {
        self.ledger.get(&id).map(|entry| entry.clone())
    }

    /// Outstanding `Pending` entries in submission order
    pub fn pending(&self) -> Vec<PendingApproval> {
        let order = self.order.lock();
        order
            .iter()
            .filter_map(|id| self.ledger.get(id))
            .filter(|entry| entry.state == ApprovalState::Pending)
            .map(|entry| entry.clone())
            .collect()
    }

    /// Whether a `Pending` entry already proposes this canonical pair
    pub fn is_pending_pair(&self, key: &EdgeKey) -> bool {
        self.ledger
            .iter()
            .any(|entry| entry.state == ApprovalState::Pending && entry.edge.key() == *key)
    }

    /// Corpus-level cancellation: drop every `Pending` entry.
    ///
    /// Decided and auto-applied entries stay for auditability.
    pub fn cancel_pending(&self) -> usize {
        let doomed: Vec<Uuid> = self
            .ledger
            .iter()
            .filter(|entry| entry.state == ApprovalState::Pending)
            .map(|entry| entry.id)
            .collect();
        for id in &doomed {
            self.ledger.remove(id);
        }
        self.order.lock().retain(|id| !doomed.contains(id));
        debug!(count = doomed.len(), "cancelled pending approvals");
        doomed.len()
    }

    /// Drop pending entries touching a deleted document
    pub fn discard_for_document(&self, document_id: &str) -> usize {
        let doomed: Vec<Uuid> = self
            .ledger
            .iter()
            .filter(|entry| {
                entry.state == ApprovalState::Pending
                    && (entry.edge.source_id == document_id
                        || entry.edge.target_id == document_id)
            })
            .map(|entry| entry.id)
            .collect();
        for id in &doomed {
            self.ledger.remove(id);
        }
        self.order.lock().retain(|id| !doomed.contains(id));
        doomed.len()
    }

    /// Total ledger size, decided entries included
    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    /// Whether the ledger is empty
    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }
}
