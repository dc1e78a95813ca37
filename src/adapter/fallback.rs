//! Generic fallback adapter
//!
//! For languages without a dedicated adapter, every file becomes one file-level
//! container named after the file, with no members. Files are not opened, so
//! the fallback never skips anything.

use super::framework::{Extraction, LanguageAdapter};
use crate::language::LanguageTag;
use crate::model::{file_basename, ApiEntry, ContainerKind};
use std::path::PathBuf;

/// Fallback adapter bound to the language group it stands in for
#[derive(Debug, Clone, Copy)]
pub struct FallbackAdapter {
    language: LanguageTag,
}

impl FallbackAdapter {
    pub fn new(language: LanguageTag) -> Self {
        Self { language }
    }
}

impl LanguageAdapter for FallbackAdapter {
    fn language(&self) -> LanguageTag {
        self.language
    }

    fn extract(&self, files: &[PathBuf]) -> Extraction {
        let mut result = Extraction::new();
        for path in files {
            result.entries.push(ApiEntry::new(
                path.clone(),
                self.language,
                file_basename(path),
                ContainerKind::File,
            ));
        }
        result
    }
}
