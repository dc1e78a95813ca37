//! Python language adapter
//!
//! Only column-0 `class` and `def` headers are considered, so nested functions
//! and methods never show up. Names starting with `_` are private by convention.

use super::framework::{extract_each, Extraction, LanguageAdapter};
use crate::language::LanguageTag;
use crate::model::{module_stem, ApiEntry, ApiMember, ContainerKind, MemberKind};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static CLASS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^class\s+(\w+)\s*[(:]").expect("valid class pattern"));
static DEF_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?:async\s+)?def\s+(\w+)\s*\(").expect("valid def pattern"));

/// Python language adapter
pub struct PythonAdapter;

impl PythonAdapter {
    fn scan(path: &Path, text: &str) -> Vec<ApiEntry> {
        let module = module_stem(path);
        let mut entries = Vec::new();

        for caps in CLASS_PATTERN.captures_iter(text) {
            let class_name = &caps[1];
            if !is_public(class_name) {
                continue;
            }
            entries.push(ApiEntry::new(
                path,
                LanguageTag::Python,
                format!("{}.{}", module, class_name),
                ContainerKind::Class,
            ));
        }

        let members: Vec<ApiMember> = DEF_PATTERN
            .captures_iter(text)
            .map(|caps| caps[1].to_string())
            .filter(|name| is_public(name))
            .map(|name| ApiMember::public(name, MemberKind::Function))
            .collect();

        if !members.is_empty() {
            entries.push(
                ApiEntry::new(path, LanguageTag::Python, module, ContainerKind::Module)
                    .with_members(members),
            );
        }

        entries
    }
}

fn is_public(name: &str) -> bool {
    !name.starts_with('_')
}

impl LanguageAdapter for PythonAdapter {
    fn language(&self) -> LanguageTag {
        LanguageTag::Python
    }

    fn extract(&self, files: &[PathBuf]) -> Extraction {
        extract_each(files, Self::scan)
    }
}
