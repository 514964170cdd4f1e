//! Filesystem document store
//!
//! Adapts a flat directory of Markdown files to the engine's
//! [`DocumentStore`] boundary. The file stem becomes the document id, so
//! `notes/recipes.md` is the document `recipes`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, warn};

use notelink_core::{Document, DocumentStore};

/// Document store over a directory of `.md` files.
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    /// Create a store rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn list_documents(&self) -> Result<Vec<Document>> {
        let root = self.root.clone();
        // Directory walking is blocking I/O; keep it off the async executor
        let documents = tokio::task::spawn_blocking(move || -> Result<Vec<Document>> {
            let mut documents = Vec::new();
            let entries = std::fs::read_dir(&root)
                .with_context(|| format!("reading note directory {}", root.display()))?;

            for entry in entries {
                let entry = entry?;
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("md") {
                    continue;
                }
                let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                    warn!(path = %path.display(), "skipping note with non-UTF-8 name");
                    continue;
                };

                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading note {}", path.display()))?;
                documents.push(Document::new(stem, text));
            }

            // Stable enumeration makes runs reproducible
            documents.sort_by(|a, b| a.id.cmp(&b.id));
            Ok(documents)
        })
        .await
        .context("note directory walk panicked")??;

        debug!(count = documents.len(), "listed notes");
        Ok(documents)
    }
}
