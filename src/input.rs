// Loading plain-text books from disk for the CLI.
//
// Files are read concurrently but returned in the order given, so document
// order (and therefore topic inference) does not depend on I/O timing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::debug;

use crate::pipeline::Document;

/// Document id for a path: the file stem.
pub fn document_id(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Display title for a path: the file name without a trailing `.txt`.
pub fn document_title(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    match name.strip_suffix(".txt") {
        Some(stem) => stem.to_string(),
        None => name,
    }
}

/// Read one file as a document. Invalid UTF-8 is replaced, not rejected.
pub async fn load_document(path: &Path) -> Result<Document> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes).into_owned();
    debug!(path = %path.display(), bytes = bytes.len(), "Loaded document");
    Ok(Document::new(document_id(path), document_title(path), text))
}

/// Read every path with at most `concurrency` reads in flight, preserving order.
pub async fn load_documents(paths: &[PathBuf], concurrency: usize) -> Result<Vec<Document>> {
    stream::iter(paths)
        .map(|path| load_document(path))
        .buffered(concurrency.max(1))
        .try_collect()
        .await
}
