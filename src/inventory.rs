//! Existing documentation discovery
//!
//! Lists Markdown files already in a tree so callers can tell generated API pages
//! from hand-written ones before writing anything.

use crate::noise::NoiseFilter;
use crate::manifest::noise_free_walk;
use crate::model::{DocKind, DocRecord};
use std::path::Path;
use std::sync::Arc;

/// Find every `.md` file under `root`, skipping version-control metadata.
pub fn scan_docs(root: &Path) -> Vec<DocRecord> {
    let filter = Arc::new(NoiseFilter::with_markers(root, &[".git"], None));
    let mut docs = Vec::new();

    for entry in noise_free_walk(root, filter).flatten() {
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let path = entry.path();
        let is_markdown = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase().ends_with(".md"))
            .unwrap_or(false);
        if !is_markdown {
            continue;
        }

        docs.push(DocRecord {
            path: path.to_path_buf(),
            kind: classify_doc(path),
        });
    }

    docs
}

fn classify_doc(path: &Path) -> DocKind {
    let normalized = path.to_string_lossy().replace('\\', "/").to_lowercase();
    if normalized.contains("/api/") {
        DocKind::Api
    } else {
        DocKind::Generic
    }
}
