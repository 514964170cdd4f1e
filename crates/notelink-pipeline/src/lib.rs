//! # Notelink Pipeline
//!
//! The scan pipeline for the notelink similarity-graph engine:
//!
//! 1. **Embed**: extract a vector per document (bounded fan-out, cancellable)
//! 2. **Index**: upsert vectors into the similarity index
//! 3. **Select**: query neighbours and apply threshold/limit policy
//! 4. **Gate**: queue candidates for approval or mark them auto-applied
//! 5. **Apply**: mutate the link graph idempotently
//!
//! The entry point is [`NoteLinker`], created from a host-supplied
//! [`DocumentStore`](notelink_core::DocumentStore) and an
//! [`EmbeddingProvider`](notelink_core::EmbeddingProvider). Per-document
//! failures never abort a scan; they are recorded in the [`ScanReport`].
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use notelink_core::LinkerConfig;
//! use notelink_pipeline::create_note_linker;
//!
//! # async fn run(store: Arc<dyn notelink_core::DocumentStore>,
//! #              provider: Arc<dyn notelink_core::EmbeddingProvider>)
//! #              -> anyhow::Result<()> {
//! let linker = create_note_linker(store, provider);
//! let report = linker.scan(&LinkerConfig::default()).await?;
//! println!("{} candidates, {} pending", report.candidates, report.pending);
//! linker.shutdown();
//! # Ok(())
//! # }
//! ```

pub mod approval;
pub mod engine;
pub mod graph;
pub mod report;
pub mod selector;

pub use approval::ApprovalGate;
pub use engine::{create_note_linker, NoteLinker};
pub use graph::{ApplyOutcome, LinkGraph};
pub use report::ScanReport;
pub use selector::select;
