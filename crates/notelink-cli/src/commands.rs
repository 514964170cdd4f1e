//! Command implementations

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use tracing::info;

use notelink_core::{ApprovalState, LinkerConfig};
use notelink_embed::HashEmbedder;
use notelink_pipeline::{create_note_linker, NoteLinker};

use crate::store::FsDocumentStore;

/// Run a scan over a note directory and report (or queue) proposed links.
pub async fn scan(
    dir: &Path,
    threshold: f32,
    limit: usize,
    auto: bool,
    dimensions: usize,
) -> Result<()> {
    let config = LinkerConfig {
        similarity_threshold: threshold,
        connection_limit: limit,
        manual_approval: !auto,
    };

    let store = Arc::new(FsDocumentStore::new(dir));
    let provider = Arc::new(HashEmbedder::new(dimensions));
    let linker = create_note_linker(store, provider);

    let report = linker.scan(&config).await?;

    println!(
        "Scanned {} notes in {:.1?} ({} candidate links)",
        report.documents_scanned, report.duration, report.candidates
    );
    for (id, error) in &report.extraction_failures {
        println!("  {} {id}: {error}", "extraction failed".yellow());
    }

    if auto {
        for edge in linker.graph().edges() {
            println!(
                "  {} {} <-> {}",
                "linked".green(),
                edge.key.first(),
                edge.key.second()
            );
        }
        return Ok(());
    }

    approve_interactively(&linker)?;

    let edges = linker.graph().edges();
    if edges.is_empty() {
        println!("No links applied.");
    } else {
        println!("Applied {} link(s):", edges.len());
        for edge in edges {
            println!("  {} <-> {}", edge.key.first(), edge.key.second());
        }
    }
    linker.shutdown();
    Ok(())
}

/// Walk the pending queue, asking y/n for each proposed link.
fn approve_interactively(linker: &NoteLinker) -> Result<()> {
    let pending = linker.gate().pending();
    if pending.is_empty() {
        println!("Nothing to approve.");
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    for approval in pending {
        print!(
            "Link {} <-> {} (score {:.2})? [y/N] ",
            approval.edge.source_id.bold(),
            approval.edge.target_id.bold(),
            approval.edge.score
        );
        io::stdout().flush()?;

        let accept = matches!(
            lines.next().transpose()?.as_deref().map(str::trim),
            Some("y") | Some("Y") | Some("yes")
        );
        let decided = linker.decide(approval.id, accept)?;
        if decided.state == ApprovalState::Approved {
            info!(source = %decided.edge.source_id, target = %decided.edge.target_id, "approved");
        }
    }
    Ok(())
}
