//! JavaScript language adapter
//!
//! Collects `export function name(` and `export const name = (` into one
//! module container per file. Declared functions come first, then arrow consts.

use super::framework::{extract_each, Extraction, LanguageAdapter};
use crate::language::LanguageTag;
use crate::model::{file_basename, ApiEntry, ApiMember, ContainerKind, MemberKind};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static EXPORT_FUNC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s+function\s+(\w+)\s*\(").expect("valid export function pattern"));
static EXPORT_CONST_FUNC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s+const\s+(\w+)\s*=\s*\(").expect("valid export const pattern"));

/// JavaScript language adapter
pub struct JavaScriptAdapter;

impl JavaScriptAdapter {
    fn scan(path: &Path, text: &str) -> Vec<ApiEntry> {
        let members: Vec<ApiMember> = EXPORT_FUNC
            .captures_iter(text)
            .chain(EXPORT_CONST_FUNC.captures_iter(text))
            .map(|caps| ApiMember::public(&caps[1], MemberKind::Function))
            .collect();

        if members.is_empty() {
            return Vec::new();
        }

        vec![
            ApiEntry::new(path, LanguageTag::Javascript, file_basename(path), ContainerKind::Module)
                .with_members(members),
        ]
    }
}

impl LanguageAdapter for JavaScriptAdapter {
    fn language(&self) -> LanguageTag {
        LanguageTag::Javascript
    }

    fn extract(&self, files: &[PathBuf]) -> Extraction {
        extract_each(files, Self::scan)
    }
}
