//! Language Adapter Framework
//!
//! Each supported language has one adapter turning its files into normalized
//! `ApiEntry` records with shallow lexical patterns. Languages without an adapter
//! are routed to the fallback, which emits one file-level stub per file.
//!
//! Adding a language means one new module implementing `LanguageAdapter` and
//! one line in `default_registry`.

pub mod framework;
pub mod fallback;
pub mod csharp;
pub mod go;
pub mod java;
pub mod javascript;
pub mod python;
pub mod rust;
pub mod typescript;

pub use framework::{LanguageAdapter, Extraction, Handler, AdapterRegistry, default_registry, extract_each};
pub use fallback::FallbackAdapter;
