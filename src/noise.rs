use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

/// Version control, dependency cache and build output markers.
pub const NOISE_MARKERS: &[&str] = &[".git", "node_modules", "bin", "obj"];

/// Coarse path filter for repository walks.
///
/// A path is noise when its root-relative form contains any marker as a substring,
/// so `src/combine.py` is skipped along with `bin/`. Extra gitignore-style patterns
/// from the config are matched on top of that.
pub struct NoiseFilter {
    markers: Vec<String>,
    extra: Gitignore,
}

impl NoiseFilter {
    pub fn new(root: &Path, extra_excludes: Option<&[String]>) -> Self {
        Self::with_markers(root, NOISE_MARKERS, extra_excludes)
    }

    pub fn with_markers(root: &Path, markers: &[&str], extra_excludes: Option<&[String]>) -> Self {
        let mut builder = GitignoreBuilder::new(root);

        if let Some(excludes) = extra_excludes {
            for pattern in excludes {
                if let Err(e) = builder.add_line(None, pattern) {
                    tracing::warn!("Ignoring invalid exclude pattern {:?}: {}", pattern, e);
                }
            }
        }

        Self {
            markers: markers.iter().map(|m| m.to_string()).collect(),
            extra: builder.build().unwrap_or_else(|_| Gitignore::empty()),
        }
    }

    /// `relative` must be relative to the walk root.
    pub fn is_ignored(&self, relative: &Path, is_dir: bool) -> bool {
        let normalized = relative.to_string_lossy().replace('\\', "/");
        if self.markers.iter().any(|m| normalized.contains(m.as_str())) {
            return true;
        }
        if relative.as_os_str().is_empty() {
            return false;
        }
        self.extra
            .matched_path_or_any_parents(relative, is_dir)
            .is_ignore()
    }
}
