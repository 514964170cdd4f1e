//! Scan engine
//!
//! [`NoteLinker`] owns the similarity index, approval gate, and link graph,
//! and drives the scan phases over a host-supplied document store and
//! embedding provider. Configuration is passed per invocation, never stored.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};
use uuid::Uuid;

use notelink_core::{
    ApprovalError, ApprovalState, Document, DocumentStore, Edge, EmbeddingProvider, LinkerConfig,
    PendingApproval,
};
use notelink_index::SimilarityIndex;

use crate::approval::ApprovalGate;
use crate::graph::{ApplyOutcome, LinkGraph};
use crate::report::ScanReport;
use crate::selector::select;

/// Upper bound on concurrent embedding calls regardless of core count
const MAX_EXTRACTION_CONCURRENCY: usize = 8;

/// The similarity-graph engine.
///
/// Create with [`create_note_linker`], run scans with [`scan`](Self::scan),
/// and tear down with [`shutdown`](Self::shutdown). All methods take `&self`;
/// the engine is safe to share behind an `Arc`.
pub struct NoteLinker {
    store: Arc<dyn DocumentStore>,
    provider: Arc<dyn EmbeddingProvider>,
    index: SimilarityIndex,
    gate: ApprovalGate,
    graph: LinkGraph,
    cancelled: AtomicBool,
}

impl NoteLinker {
    /// Create an engine over a document store and embedding provider
    pub fn new(store: Arc<dyn DocumentStore>, provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            store,
            provider,
            index: SimilarityIndex::new(),
            gate: ApprovalGate::new(),
            graph: LinkGraph::new(),
            cancelled: AtomicBool::new(false),
        }
    }

    /// Run one corpus scan.
    ///
    /// Phases: validate config, enumerate the corpus, embed and index every
    /// document (bounded fan-out, cancellable between documents, extraction
    /// failures fall back to the zero vector), then select candidates per
    /// document and hand them to the approval gate. Auto-applied candidates
    /// mutate the link graph immediately.
    ///
    /// Pairs already connected or already pending are not re-proposed, so
    /// re-scanning an unchanged corpus is a no-op.
    pub async fn scan(&self, config: &LinkerConfig) -> Result<ScanReport> {
        config.validate().context("invalid scan configuration")?;
        self.cancelled.store(false, Ordering::SeqCst);

        let started = Instant::now();
        let documents = self
            .store
            .list_documents()
            .await
            .context("enumerating corpus")?;
        info!(
            documents = documents.len(),
            provider = self.provider.name(),
            threshold = config.similarity_threshold,
            limit = config.connection_limit,
            "starting corpus scan"
        );

        let mut report = ScanReport::default();
        self.embed_phase(&documents, &mut report).await;

        if !report.cancelled {
            self.link_phase(&documents, config, &mut report)?;
        }

        report.duration = started.elapsed();
        info!(
            scanned = report.documents_scanned,
            candidates = report.candidates,
            auto_applied = report.auto_applied,
            pending = report.pending,
            failures = report.extraction_failures.len(),
            cancelled = report.cancelled,
            "scan finished"
        );
        Ok(report)
    }

    /// Embed documents with bounded concurrency and upsert their vectors.
    ///
    /// Cancellation is honoured between documents; vectors already upserted
    /// stay in the index (re-scan replaces them by id).
    async fn embed_phase(&self, documents: &[Document], report: &mut ScanReport) {
        let concurrency = num_cpus::get().clamp(1, MAX_EXTRACTION_CONCURRENCY);
        let provider = &self.provider;

        // Collected eagerly: a lazy `map` returning async blocks trips a
        // compiler limitation ("implementation of `FnOnce` is not general
        // enough") when the scan future is spawned on a runtime
        let embed_futures: Vec<_> = documents
            .iter()
            .map(|doc| async move {
                let result = provider.embed(&doc.text).await;
                (doc, result)
            })
            .collect();
        let mut embedded = stream::iter(embed_futures).buffer_unordered(concurrency);

        while let Some((doc, result)) = embedded.next().await {
            if self.cancelled.load(Ordering::SeqCst) {
                warn!("scan cancelled during extraction");
                report.cancelled = true;
                return;
            }

            let vector = match result {
                Ok(vector) if vector.len() == provider.dimensions() => vector,
                Ok(vector) => {
                    let err = notelink_core::ExtractionError::DimensionMismatch {
                        expected: provider.dimensions(),
                        actual: vector.len(),
                    };
                    warn!(id = %doc.id, error = %err, "falling back to zero vector");
                    report.extraction_failures.push((doc.id.clone(), err.to_string()));
                    provider.zero_vector()
                }
                Err(err) => {
                    warn!(id = %doc.id, error = %err, "extraction failed, falling back to zero vector");
                    report.extraction_failures.push((doc.id.clone(), err.to_string()));
                    provider.zero_vector()
                }
            };

            self.index.upsert(&doc.id, vector);
            report.documents_scanned += 1;
        }
    }

    /// Query, select, gate, and auto-apply candidates for each document.
    fn link_phase(
        &self,
        documents: &[Document],
        config: &LinkerConfig,
        report: &mut ScanReport,
    ) -> Result<()> {
        for doc in documents {
            if self.cancelled.load(Ordering::SeqCst) {
                warn!("scan cancelled during linking");
                report.cancelled = true;
                return Ok(());
            }

            let Some(vector) = self.index.vector(&doc.id) else {
                continue;
            };
            let raw = self.index.query(
                &doc.id,
                &vector,
                config.connection_limit,
                config.similarity_threshold,
            );
            let candidates = select(
                &doc.id,
                raw,
                config.similarity_threshold,
                config.connection_limit,
            )?;

            // Re-proposing a connected or already-queued pair would only
            // produce duplicate approvals
            let fresh: Vec<_> = candidates
                .into_iter()
                .filter(|candidate| {
                    let key = candidate.key();
                    !self.graph.contains(&key) && !self.gate.is_pending_pair(&key)
                })
                .collect();
            if fresh.is_empty() {
                continue;
            }

            debug!(id = %doc.id, count = fresh.len(), "gating candidates");
            for approval in self.gate.submit(fresh, config.manual_approval) {
                report.candidates += 1;
                match approval.state {
                    ApprovalState::AutoApplied => {
                        let outcome = self
                            .graph
                            .apply(&approval.edge.source_id, &approval.edge.target_id);
                        if outcome.is_created() {
                            report.auto_applied += 1;
                        }
                    }
                    ApprovalState::Pending => report.pending += 1,
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Decide a pending approval; accepting applies the edge to the graph.
    pub fn decide(&self, id: Uuid, accept: bool) -> Result<PendingApproval, ApprovalError> {
        let approval = self.gate.decide(id, accept)?;
        if approval.state == ApprovalState::Approved {
            let outcome = self
                .graph
                .apply(&approval.edge.source_id, &approval.edge.target_id);
            if let ApplyOutcome::AlreadyConnected(_) = outcome {
                debug!(id = %id, "approved edge was already connected");
            }
        }
        Ok(approval)
    }

    /// Host deletion hook: drop the document's vector, its pending
    /// approvals, and every edge touching it. Returns the removed edges.
    pub fn on_document_deleted(&self, document_id: &str) -> Vec<Edge> {
        info!(id = document_id, "document deleted, purging state");
        self.index.remove(document_id);
        self.gate.discard_for_document(document_id);
        self.graph.remove_all(document_id)
    }

    /// Request cancellation of the scan in flight, if any.
    ///
    /// Takes effect between documents; already-indexed vectors stay put.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Cancel any running scan and discard outstanding approvals
    pub fn shutdown(&self) {
        info!("shutting down note linker");
        self.cancel();
        self.gate.cancel_pending();
    }

    /// The similarity index (mainly for inspection and tests)
    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    /// The approval gate
    pub fn gate(&self) -> &ApprovalGate {
        &self.gate
    }

    /// The link graph
    pub fn graph(&self) -> &LinkGraph {
        &self.graph
    }
}

/// Factory for the engine, returned shared so hosts can hand clones to their
/// command handlers and deletion hooks.
pub fn create_note_linker(
    store: Arc<dyn DocumentStore>,
    provider: Arc<dyn EmbeddingProvider>,
) -> Arc<NoteLinker> {
    Arc::new(NoteLinker::new(store, provider))
}
