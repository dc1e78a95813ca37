//! Normalized API model
//!
//! Every adapter, whatever its source grammar, emits entries of exactly one shape:
//! - `ApiEntry`: one documented container (class, module, or whole file)
//! - `ApiMember`: one operation inside a container
//!
//! The renderer only ever sees this model, which is what keeps it language-agnostic.

use crate::language::LanguageTag;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Placeholder for return types that no adapter resolves.
pub const UNRESOLVED_RETURN: &str = "unknown";

/// A classified source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: PathBuf,
    pub language: LanguageTag,
}

/// Classified inventory of a repository walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Source files with a recognized language, in walk order
    #[serde(default)]
    pub sources: Vec<SourceFile>,
    /// Directories named `docs` (any case), in walk order
    #[serde(default)]
    pub doc_dirs: Vec<PathBuf>,
}

/// What kind of unit a container is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    /// Class, struct, trait, interface
    Class,
    /// Module-level functions of one file
    Module,
    /// File-level stub from the fallback adapter
    File,
    /// Missing or unrecognized kind in a supplied model
    #[default]
    #[serde(other)]
    Unknown,
}

impl ContainerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerKind::Class => "class",
            ContainerKind::Module => "module",
            ContainerKind::File => "file",
            ContainerKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Function,
    Method,
    #[default]
    #[serde(other)]
    Unknown,
}

impl MemberKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Function => "function",
            MemberKind::Method => "method",
            MemberKind::Unknown => "unknown",
        }
    }
}

/// A documented operation inside a container.
///
/// `parameters` and `returns` stay as placeholders: adapters never parse signatures,
/// so the model never claims accuracy it cannot back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMember {
    pub name: String,
    #[serde(default)]
    pub kind: MemberKind,
    #[serde(default = "default_visibility")]
    pub visibility: String,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default = "default_returns")]
    pub returns: String,
    #[serde(default)]
    pub summary: String,
}

fn default_visibility() -> String {
    "public".to_string()
}

fn default_returns() -> String {
    UNRESOLVED_RETURN.to_string()
}

impl ApiMember {
    /// Create a public member with unresolved signature
    pub fn public(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
            visibility: default_visibility(),
            parameters: Vec::new(),
            returns: default_returns(),
            summary: String::new(),
        }
    }
}

/// One documented container.
///
/// `container` is chosen by the adapter and is not unique across files or languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEntry {
    #[serde(default)]
    pub file: PathBuf,
    #[serde(default = "default_language")]
    pub language: LanguageTag,
    #[serde(default = "default_container")]
    pub container: String,
    #[serde(default)]
    pub container_kind: ContainerKind,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub members: Vec<ApiMember>,
}

fn default_language() -> LanguageTag {
    LanguageTag::Unknown
}

fn default_container() -> String {
    "UnknownContainer".to_string()
}

impl ApiEntry {
    /// Create an entry with no summary and no members
    pub fn new(
        file: impl Into<PathBuf>,
        language: LanguageTag,
        container: impl Into<String>,
        container_kind: ContainerKind,
    ) -> Self {
        Self {
            file: file.into(),
            language,
            container: container.into(),
            container_kind,
            summary: String::new(),
            members: Vec::new(),
        }
    }

    /// Builder method to attach members
    pub fn with_members(mut self, members: Vec<ApiMember>) -> Self {
        self.members = members;
        self
    }

    /// Builder method to attach a summary
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }
}

/// Ordered output of extraction, input of rendering.
pub type ApiModel = Vec<ApiEntry>;

/// Kind of an existing Markdown document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    Api,
    Generic,
}

/// An existing Markdown document found by `scan_docs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocRecord {
    pub path: PathBuf,
    pub kind: DocKind,
}

/// Final path component as a string, or the whole path if it has none.
pub fn file_basename(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// File name without its extension.
pub fn module_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| file_basename(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_wire_shape() {
        let entry = ApiEntry::new("src/widget.py", LanguageTag::Python, "widget", ContainerKind::Module)
            .with_members(vec![ApiMember::public("run", MemberKind::Function)]);

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["file"], "src/widget.py");
        assert_eq!(value["language"], "python");
        assert_eq!(value["container_kind"], "module");
        assert_eq!(value["summary"], "");
        assert_eq!(value["members"][0]["name"], "run");
        assert_eq!(value["members"][0]["kind"], "function");
        assert_eq!(value["members"][0]["visibility"], "public");
        assert_eq!(value["members"][0]["parameters"], serde_json::json!([]));
        assert_eq!(value["members"][0]["returns"], "unknown");
    }

    #[test]
    fn test_lenient_entry_decoding() {
        let entry: ApiEntry = serde_json::from_value(serde_json::json!({
            "container": "Widget",
            "container_kind": "class",
            "members": [{ "name": "sum", "kind": "method" }]
        }))
        .unwrap();

        assert_eq!(entry.language, LanguageTag::Unknown);
        assert_eq!(entry.summary, "");
        assert_eq!(entry.members[0].returns, UNRESOLVED_RETURN);
        assert!(entry.members[0].parameters.is_empty());
    }

    #[test]
    fn test_unrecognized_tags_decode_as_unknown() {
        let entry: ApiEntry = serde_json::from_value(serde_json::json!({
            "language": "scala",
            "container": "Widget",
            "container_kind": "trait",
            "members": [{ "name": "sum", "kind": "macro" }, { "name": "run" }]
        }))
        .unwrap();

        assert_eq!(entry.language, LanguageTag::Unknown);
        assert_eq!(entry.container_kind, ContainerKind::Unknown);
        assert_eq!(entry.members[0].kind, MemberKind::Unknown);
        assert_eq!(entry.members[1].kind, MemberKind::Unknown);

        let bare: ApiEntry = serde_json::from_value(serde_json::json!({ "container": "Loose" })).unwrap();
        assert_eq!(bare.container_kind.as_str(), "unknown");
    }

    #[test]
    fn test_path_helpers() {
        assert_eq!(file_basename(Path::new("a/b/main.go")), "main.go");
        assert_eq!(module_stem(Path::new("a/b/widget.py")), "widget");
        assert_eq!(module_stem(Path::new("Makefile")), "Makefile");
    }
}
