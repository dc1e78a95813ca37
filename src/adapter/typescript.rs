//! TypeScript language adapter
//!
//! Only `export`ed declarations count. Each exported class is a container under
//! its bare name; exported functions are grouped into one module container named
//! after the file.

use super::framework::{extract_each, Extraction, LanguageAdapter};
use crate::language::LanguageTag;
use crate::model::{file_basename, ApiEntry, ApiMember, ContainerKind, MemberKind};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static EXPORT_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s+class\s+(\w+)").expect("valid export class pattern"));
static EXPORT_FUNC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s+function\s+(\w+)\s*\(").expect("valid export function pattern"));

/// TypeScript language adapter
pub struct TypeScriptAdapter;

impl TypeScriptAdapter {
    fn scan(path: &Path, text: &str) -> Vec<ApiEntry> {
        let mut entries: Vec<ApiEntry> = EXPORT_CLASS
            .captures_iter(text)
            .map(|caps| ApiEntry::new(path, LanguageTag::Typescript, &caps[1], ContainerKind::Class))
            .collect();

        let members: Vec<ApiMember> = EXPORT_FUNC
            .captures_iter(text)
            .map(|caps| ApiMember::public(&caps[1], MemberKind::Function))
            .collect();

        if !members.is_empty() {
            entries.push(
                ApiEntry::new(path, LanguageTag::Typescript, file_basename(path), ContainerKind::Module)
                    .with_members(members),
            );
        }

        entries
    }
}

impl LanguageAdapter for TypeScriptAdapter {
    fn language(&self) -> LanguageTag {
        LanguageTag::Typescript
    }

    fn extract(&self, files: &[PathBuf]) -> Extraction {
        extract_each(files, Self::scan)
    }
}
