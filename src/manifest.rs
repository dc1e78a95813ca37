//! Repository classifier
//!
//! Walks a root directory, drops noise paths, tags each file with a language
//! and records every directory named `docs` (any case, any depth).

use crate::noise::NoiseFilter;
use crate::language::LanguageTag;
use crate::model::{Manifest, SourceFile};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Walk settings passed in by the caller.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Extra gitignore-style patterns, relative to the root
    pub exclude: Vec<String>,
}

impl ScanOptions {
    pub fn with_excludes(exclude: Vec<String>) -> Self {
        Self { exclude }
    }
}

/// Build a fresh manifest for `root`.
///
/// Files with an unrecognized extension are left out of `sources`. A missing root
/// yields an empty manifest; walk errors below the root are logged and skipped.
pub fn build_manifest(root: &Path, options: &ScanOptions) -> Manifest {
    let filter = Arc::new(NoiseFilter::new(root, Some(&options.exclude)));
    let mut manifest = Manifest::default();

    for result in noise_free_walk(root, filter) {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("Skipping unwalkable path under {}: {}", root.display(), e);
                continue;
            }
        };

        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        let path = entry.path();

        if is_dir {
            if is_docs_dir(path) {
                manifest.doc_dirs.push(path.to_path_buf());
            }
            continue;
        }

        let language = LanguageTag::from_path(path);
        if language.is_known() {
            manifest.sources.push(SourceFile {
                path: path.to_path_buf(),
                language,
            });
        }
    }

    tracing::debug!(
        "Classified {} source files and {} doc dirs under {}",
        manifest.sources.len(),
        manifest.doc_dirs.len(),
        root.display()
    );
    manifest
}

/// Sorted, unfiltered walk with noise subtrees pruned.
pub(crate) fn noise_free_walk(root: &Path, filter: Arc<NoiseFilter>) -> ignore::Walk {
    let base: PathBuf = root.to_path_buf();
    WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            let relative = entry.path().strip_prefix(&base).unwrap_or(entry.path());
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            !filter.is_ignored(relative, is_dir)
        })
        .build()
}

fn is_docs_dir(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().eq_ignore_ascii_case("docs"))
        .unwrap_or(false)
}
