//! Go language adapter
//!
//! Exported functions (uppercase initial) become members of one module-level
//! container per file. Functions with a receiver are reported as methods.

use super::framework::{extract_each, Extraction, LanguageAdapter};
use crate::language::LanguageTag;
use crate::model::{file_basename, ApiEntry, ApiMember, ContainerKind, MemberKind};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static FUNC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^func\s+(\(.*?\)\s*)?(\w+)\s*\(").expect("valid func pattern")
});

/// Go language adapter
pub struct GoAdapter;

impl GoAdapter {
    fn scan(path: &Path, text: &str) -> Vec<ApiEntry> {
        let members: Vec<ApiMember> = FUNC_PATTERN
            .captures_iter(text)
            .filter(|caps| is_exported(&caps[2]))
            .map(|caps| {
                let kind = if caps.get(1).is_some() {
                    MemberKind::Method
                } else {
                    MemberKind::Function
                };
                ApiMember::public(&caps[2], kind)
            })
            .collect();

        if members.is_empty() {
            return Vec::new();
        }

        vec![
            ApiEntry::new(path, LanguageTag::Go, file_basename(path), ContainerKind::Module)
                .with_members(members),
        ]
    }
}

fn is_exported(name: &str) -> bool {
    name.chars().next().map(char::is_uppercase).unwrap_or(false)
}

impl LanguageAdapter for GoAdapter {
    fn language(&self) -> LanguageTag {
        LanguageTag::Go
    }

    fn extract(&self, files: &[PathBuf]) -> Extraction {
        extract_each(files, Self::scan)
    }
}
