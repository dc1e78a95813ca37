//! C# language adapter
//!
//! Every `public class` becomes a container qualified by the first namespace in
//! the file. Public methods are collected from the class header to end of file,
//! without tracking braces, so a later class's methods also land in earlier ones.

use super::framework::{extract_each, Extraction, LanguageAdapter};
use crate::language::LanguageTag;
use crate::model::{ApiEntry, ApiMember, ContainerKind, MemberKind};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static CLASS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"public\s+class\s+(\w+)").expect("valid class pattern"));
static NAMESPACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"namespace\s+([\w\.]+)").expect("valid namespace pattern"));
static METHOD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"public\s+(?:async\s+)?[\w<>,\[\]]+\s+(\w+)\s*\(").expect("valid method pattern")
});

/// C# language adapter
pub struct CSharpAdapter;

impl CSharpAdapter {
    fn scan(path: &Path, text: &str) -> Vec<ApiEntry> {
        let namespace = NAMESPACE_PATTERN
            .captures(text)
            .map(|caps| caps[1].to_string())
            .unwrap_or_default();

        CLASS_PATTERN
            .captures_iter(text)
            .map(|caps| {
                let class_name = &caps[1];
                let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
                let members = METHOD_PATTERN
                    .captures_iter(&text[start..])
                    .map(|m| ApiMember::public(&m[1], MemberKind::Method))
                    .collect();

                ApiEntry::new(path, LanguageTag::Csharp, qualify(&namespace, class_name), ContainerKind::Class)
                    .with_members(members)
            })
            .collect()
    }
}

pub(super) fn qualify(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

impl LanguageAdapter for CSharpAdapter {
    fn language(&self) -> LanguageTag {
        LanguageTag::Csharp
    }

    fn extract(&self, files: &[PathBuf]) -> Extraction {
        extract_each(files, Self::scan)
    }
}
