//! Rust language adapter
//!
//! Column-0 `pub struct|enum|trait` items become class containers `<module>.<Name>`;
//! column-0 `pub fn` items are grouped into one module container. Indented items
//! (inherent methods, nested modules) are out of reach by construction.

use super::framework::{extract_each, Extraction, LanguageAdapter};
use crate::language::LanguageTag;
use crate::model::{module_stem, ApiEntry, ApiMember, ContainerKind, MemberKind};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static TYPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^pub\s+(?:struct|enum|trait)\s+(\w+)").expect("valid type pattern")
});
static FN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^pub\s+(?:const\s+)?(?:async\s+)?(?:unsafe\s+)?fn\s+(\w+)").expect("valid fn pattern")
});

/// Rust language adapter
pub struct RustAdapter;

impl RustAdapter {
    fn scan(path: &Path, text: &str) -> Vec<ApiEntry> {
        let module = module_stem(path);

        let mut entries: Vec<ApiEntry> = TYPE_PATTERN
            .captures_iter(text)
            .map(|caps| {
                ApiEntry::new(path, LanguageTag::Rust, format!("{}.{}", module, &caps[1]), ContainerKind::Class)
            })
            .collect();

        let members: Vec<ApiMember> = FN_PATTERN
            .captures_iter(text)
            .map(|caps| ApiMember::public(&caps[1], MemberKind::Function))
            .collect();

        if !members.is_empty() {
            entries.push(
                ApiEntry::new(path, LanguageTag::Rust, module, ContainerKind::Module).with_members(members),
            );
        }

        entries
    }
}

impl LanguageAdapter for RustAdapter {
    fn language(&self) -> LanguageTag {
        LanguageTag::Rust
    }

    fn extract(&self, files: &[PathBuf]) -> Extraction {
        extract_each(files, Self::scan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_items() {
        let source = r#"
pub struct Config {
    pub name: String,
}

impl Config {
    pub fn new() -> Self { todo!() }
}

pub(crate) struct Hidden;
enum Private {}
pub trait Load {}

pub fn load(path: &Path) -> Config { todo!() }
pub async fn fetch() {}
fn helper() {}
"#;
        let entries = RustAdapter::scan(Path::new("src/config.rs"), source);

        let containers: Vec<_> = entries.iter().map(|e| e.container.as_str()).collect();
        assert_eq!(containers, vec!["config.Config", "config.Load", "config"]);
        let names: Vec<_> = entries[2].members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["load", "fetch"]);
    }
}
