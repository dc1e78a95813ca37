//! Java language adapter

use super::csharp::qualify;
use super::framework::{extract_each, Extraction, LanguageAdapter};
use crate::language::LanguageTag;
use crate::model::{ApiEntry, ApiMember, ContainerKind, MemberKind};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static CLASS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"public\s+(?:(?:abstract|final|static)\s+)*class\s+(\w+)").expect("valid class pattern")
});
static PACKAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"package\s+([\w\.]+);").expect("valid package pattern"));
static METHOD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"public\s+(?:(?:static|final|abstract|synchronized)\s+)*[\w<>,\[\]\.?]+\s+(\w+)\s*\(")
        .expect("valid method pattern")
});

/// Java language adapter
///
/// Public classes are qualified by the file's package. Member listing is a
/// heuristic extra: every public method from the class header to end of file
/// is attached, so a later class's methods also land on an earlier one.
pub struct JavaAdapter;

impl JavaAdapter {
    fn scan(path: &Path, text: &str) -> Vec<ApiEntry> {
        let package = PACKAGE_PATTERN
            .captures(text)
            .map(|caps| caps[1].to_string())
            .unwrap_or_default();

        CLASS_PATTERN
            .captures_iter(text)
            .map(|caps| {
                let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
                let members = METHOD_PATTERN
                    .captures_iter(&text[start..])
                    .map(|m| ApiMember::public(&m[1], MemberKind::Method))
                    .collect();

                ApiEntry::new(path, LanguageTag::Java, qualify(&package, &caps[1]), ContainerKind::Class)
                    .with_members(members)
            })
            .collect()
    }
}

impl LanguageAdapter for JavaAdapter {
    fn language(&self) -> LanguageTag {
        LanguageTag::Java
    }

    fn extract(&self, files: &[PathBuf]) -> Extraction {
        extract_each(files, Self::scan)
    }
}
