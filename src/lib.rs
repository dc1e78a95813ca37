//! # Docpipe - multi-language API documentation pipeline
//!
//! Scans a source tree and turns its public surface into Markdown reference pages.
//!
//! Docpipe provides:
//! - A repository classifier that maps files to language tags by extension
//! - Pluggable, regex-based extraction adapters with a generic fallback
//! - A single normalized API model shared by every language
//! - Deterministic template-based rendering into one page per container
//! - A JSON-lines request server exposing the pipeline to external tooling

pub mod language;
pub mod model;
pub mod noise;
pub mod manifest;
pub mod inventory;
pub mod adapter;
pub mod pipeline;
pub mod render;
pub mod server;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use language::LanguageTag;
pub use model::{ApiEntry, ApiMember, ApiModel, ContainerKind, DocRecord, Manifest, MemberKind, SourceFile};
pub use manifest::{build_manifest, ScanOptions};
pub use inventory::scan_docs;
pub use adapter::{default_registry, AdapterRegistry, Extraction, LanguageAdapter};
pub use pipeline::{extract_api, ApiReport, Extractor};
pub use render::{CollisionPolicy, Renderer, Template};

use std::path::PathBuf;

/// Result type alias for Docpipe operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Docpipe operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template not found: {}", .0.display())]
    TemplateMissing(PathBuf),

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
