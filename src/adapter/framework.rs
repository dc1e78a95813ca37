//! Core adapter framework
//!
//! Defines the trait every extraction adapter implements and the registry that
//! routes each language group to exactly one handler.

use crate::language::LanguageTag;
use crate::model::ApiEntry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::fallback::FallbackAdapter;

/// Result of running an adapter over a batch of files
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Normalized entries, in file-encounter order
    pub entries: Vec<ApiEntry>,
    /// Files that could not be read or decoded
    pub skipped: Vec<PathBuf>,
}

impl Extraction {
    /// Create a new empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Append another result, preserving order
    pub fn merge(&mut self, other: Extraction) {
        self.entries.extend(other.entries);
        self.skipped.extend(other.skipped);
    }
}

/// Trait for language adapters
///
/// Each adapter:
/// 1. Reads its files as UTF-8 text, skipping any it cannot read
/// 2. Finds top-level declarations with shallow lexical patterns
/// 3. Keeps only exported/public declarations
/// 4. Emits zero or more `ApiEntry` records per file
pub trait LanguageAdapter: Send + Sync {
    /// The language this adapter handles
    fn language(&self) -> LanguageTag;

    /// Extract entries from a batch of files of this adapter's language
    fn extract(&self, files: &[PathBuf]) -> Extraction;
}

/// Run `scan` over every readable file, recording the unreadable ones.
///
/// One bad file never aborts the batch.
pub fn extract_each<F>(files: &[PathBuf], mut scan: F) -> Extraction
where
    F: FnMut(&Path, &str) -> Vec<ApiEntry>,
{
    let mut result = Extraction::new();
    for path in files {
        match std::fs::read_to_string(path) {
            Ok(text) => result.entries.extend(scan(path, &text)),
            Err(e) => {
                tracing::debug!("Skipping unreadable file {}: {}", path.display(), e);
                result.skipped.push(path.clone());
            }
        }
    }
    result
}

/// The handler a language group is routed to
pub enum Handler<'a> {
    Dedicated(&'a dyn LanguageAdapter),
    Fallback(FallbackAdapter),
}

impl Handler<'_> {
    pub fn extract(&self, files: &[PathBuf]) -> Extraction {
        match self {
            Handler::Dedicated(adapter) => adapter.extract(files),
            Handler::Fallback(adapter) => adapter.extract(files),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Handler::Fallback(_))
    }
}

/// Fixed mapping from language tag to adapter
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: BTreeMap<LanguageTag, Box<dyn LanguageAdapter>>,
}

impl AdapterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter under its own language tag, replacing any previous one
    pub fn register(&mut self, adapter: impl LanguageAdapter + 'static) {
        self.adapters.insert(adapter.language(), Box::new(adapter));
    }

    /// Resolve the handler for a language; unregistered tags get the fallback
    pub fn resolve(&self, language: LanguageTag) -> Handler<'_> {
        match self.adapters.get(&language) {
            Some(adapter) => Handler::Dedicated(adapter.as_ref()),
            None => Handler::Fallback(FallbackAdapter::new(language)),
        }
    }

    /// Languages with a dedicated adapter
    pub fn languages(&self) -> Vec<LanguageTag> {
        self.adapters.keys().copied().collect()
    }
}

/// Create a registry with all built-in adapters
pub fn default_registry() -> AdapterRegistry {
    let mut registry = AdapterRegistry::new();
    registry.register(super::csharp::CSharpAdapter);
    registry.register(super::typescript::TypeScriptAdapter);
    registry.register(super::javascript::JavaScriptAdapter);
    registry.register(super::python::PythonAdapter);
    registry.register(super::java::JavaAdapter);
    registry.register(super::go::GoAdapter);
    registry.register(super::rust::RustAdapter);
    registry
}
