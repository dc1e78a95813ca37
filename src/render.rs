//! Document renderer
//!
//! Writes one Markdown page per `ApiEntry` by filling a five-placeholder template.
//! Output names come from the sanitized container name, so two entries can map to
//! the same file; `CollisionPolicy` decides what happens then.

use crate::model::{ApiEntry, ApiMember};
use crate::{Error, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

pub const PLACEHOLDER_CONTAINER_KIND: &str = "{{CONTAINER_KIND}}";
pub const PLACEHOLDER_CONTAINER: &str = "{{CONTAINER}}";
pub const PLACEHOLDER_LANGUAGE: &str = "{{LANGUAGE}}";
pub const PLACEHOLDER_SUMMARY: &str = "{{SUMMARY}}";
pub const PLACEHOLDER_MEMBERS: &str = "{{MEMBERS_SECTION}}";

const PLACEHOLDERS: [&str; 5] = [
    PLACEHOLDER_CONTAINER_KIND,
    PLACEHOLDER_CONTAINER,
    PLACEHOLDER_LANGUAGE,
    PLACEHOLDER_SUMMARY,
    PLACEHOLDER_MEMBERS,
];

pub const NO_MEMBERS: &str = "_No public members detected._";
pub const NO_SUMMARY: &str = "_No summary available._";
pub const DOC_EXTENSION: &str = "md";

/// Single-pass matcher, so substituted values are never rescanned.
static PLACEHOLDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{(CONTAINER_KIND|CONTAINER|LANGUAGE|SUMMARY|MEMBERS_SECTION)\}\}")
        .expect("valid placeholder pattern")
});

const BUILTIN_TEMPLATE: &str = "# {{CONTAINER}}

- **Kind:** {{CONTAINER_KIND}}
- **Language:** {{LANGUAGE}}

## Summary

{{SUMMARY}}

## Members

{{MEMBERS_SECTION}}
";

/// A page template holding all five placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    text: String,
}

impl Template {
    /// Validate template text
    pub fn parse(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let missing: Vec<&str> = PLACEHOLDERS
            .iter()
            .copied()
            .filter(|p| !text.contains(p))
            .collect();
        if !missing.is_empty() {
            return Err(Error::InvalidTemplate(format!("missing placeholders: {}", missing.join(", "))));
        }
        Ok(Self { text })
    }

    /// Load a template file; a missing file is fatal for rendering
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::TemplateMissing(path.to_path_buf()));
        }
        Self::parse(std::fs::read_to_string(path)?)
    }

    /// The template shipped with the binary
    pub fn builtin() -> Self {
        Self {
            text: BUILTIN_TEMPLATE.to_string(),
        }
    }

    /// Fill every placeholder for one entry
    pub fn fill(&self, entry: &ApiEntry) -> String {
        let summary = if entry.summary.is_empty() {
            NO_SUMMARY
        } else {
            entry.summary.as_str()
        };
        let members = members_section(&entry.members);

        PLACEHOLDER_PATTERN
            .replace_all(&self.text, |caps: &Captures| match &caps[1] {
                "CONTAINER_KIND" => entry.container_kind.as_str().to_string(),
                "CONTAINER" => entry.container.clone(),
                "LANGUAGE" => entry.language.as_str().to_string(),
                "SUMMARY" => summary.to_string(),
                _ => members.clone(),
            })
            .into_owned()
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::builtin()
    }
}

/// One bullet per member; parameters are elided because they are never known.
pub fn members_section(members: &[ApiMember]) -> String {
    if members.is_empty() {
        return NO_MEMBERS.to_string();
    }
    members
        .iter()
        .map(|m| format!("- `{}(...)` — {}", m.name, m.summary).trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Base file name for a container, before any collision handling
pub fn sanitize_container(container: &str) -> String {
    container.replace([' ', '/', '\\'], "_")
}

/// What to do when two entries sanitize to the same file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Last entry in model order wins; earlier pages are lost
    Overwrite,
    /// Later entries get a suffix derived from their language and source file
    #[default]
    Disambiguate,
}

impl std::str::FromStr for CollisionPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "overwrite" => Ok(CollisionPolicy::Overwrite),
            "disambiguate" => Ok(CollisionPolicy::Disambiguate),
            _ => Err(Error::Config(format!("Unknown collision policy: {}", s))),
        }
    }
}

/// Renders an API model into a directory of pages
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    template: Template,
    policy: CollisionPolicy,
}

impl Renderer {
    pub fn new(template: Template) -> Self {
        Self {
            template,
            policy: CollisionPolicy::default(),
        }
    }

    /// Builder method to set the collision policy
    pub fn with_policy(mut self, policy: CollisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// Write one page per entry, in model order, and return the written paths.
    ///
    /// Existing files with the same name are overwritten.
    pub fn render(&self, model: &[ApiEntry], output_dir: &Path) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(output_dir)?;

        let mut used: HashSet<String> = HashSet::new();
        let mut generated = Vec::with_capacity(model.len());

        for entry in model {
            let name = self.file_name(entry, &mut used);
            let out_path = output_dir.join(format!("{}.{}", name, DOC_EXTENSION));
            std::fs::write(&out_path, self.template.fill(entry))?;
            generated.push(out_path);
        }

        tracing::info!("Rendered {} pages into {}", generated.len(), output_dir.display());
        Ok(generated)
    }

    fn file_name(&self, entry: &ApiEntry, used: &mut HashSet<String>) -> String {
        let base = sanitize_container(&entry.container);
        if used.insert(base.clone()) {
            return base;
        }

        match self.policy {
            CollisionPolicy::Overwrite => {
                tracing::warn!("{} from {} overwrites an earlier page", base, entry.file.display());
                base
            }
            CollisionPolicy::Disambiguate => {
                let hashed = format!("{}-{}", base, origin_hash(entry));
                let mut candidate = hashed.clone();
                let mut n = 2;
                while !used.insert(candidate.clone()) {
                    candidate = format!("{}-{}", hashed, n);
                    n += 1;
                }
                tracing::warn!("{} from {} collides, writing {}", base, entry.file.display(), candidate);
                candidate
            }
        }
    }
}

/// Short stable hash of where an entry came from
fn origin_hash(entry: &ApiEntry) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(entry.language.as_str().as_bytes());
    hasher.update(b"\0");
    hasher.update(entry.file.to_string_lossy().as_bytes());
    hasher.finalize().to_hex()[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LanguageTag;
    use crate::model::{ContainerKind, MemberKind};
    use std::fs;
    use tempfile::TempDir;

    fn widget() -> ApiEntry {
        ApiEntry::new("src/widget.ts", LanguageTag::Typescript, "Widget", ContainerKind::Class)
            .with_members(vec![ApiMember::public("sum", MemberKind::Method)])
    }

    #[test]
    fn test_fill_builtin() {
        let page = Template::builtin().fill(&widget());

        assert!(page.starts_with("# Widget\n"));
        assert!(page.contains("- **Kind:** class"));
        assert!(page.contains("- **Language:** typescript"));
        assert!(page.contains(NO_SUMMARY));
        assert!(page.lines().any(|l| l == "- `sum(...)` —"));
        assert!(!page.contains("{{"));
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let entry = widget().with_summary("Literal {{LANGUAGE}} token");
        let page = Template::builtin().fill(&entry);
        assert!(page.contains("Literal {{LANGUAGE}} token"));
    }

    #[test]
    fn test_members_section() {
        assert_eq!(members_section(&[]), NO_MEMBERS);

        let mut documented = ApiMember::public("load", MemberKind::Function);
        documented.summary = "Load from disk".to_string();
        let plain = ApiMember::public("save", MemberKind::Function);
        assert_eq!(
            members_section(&[documented, plain]),
            "- `load(...)` — Load from disk\n- `save(...)` —"
        );
    }

    #[test]
    fn test_template_validation() {
        let err = Template::parse("# {{CONTAINER}}").unwrap_err();
        assert!(matches!(err, Error::InvalidTemplate(_)));

        let dir = TempDir::new().unwrap();
        let err = Template::load(&dir.path().join("missing.md")).unwrap_err();
        assert!(matches!(err, Error::TemplateMissing(_)));

        let path = dir.path().join("custom.md");
        fs::write(&path, "{{CONTAINER_KIND}} {{CONTAINER}} {{LANGUAGE}}\n{{SUMMARY}}\n{{MEMBERS_SECTION}}\n").unwrap();
        let template = Template::load(&path).unwrap();
        assert_eq!(template.fill(&widget()), "class Widget typescript\n_No summary available._\n- `sum(...)` —\n");
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_container("My Class"), "My_Class");
        assert_eq!(sanitize_container("a/b\\c"), "a_b_c");
        assert_eq!(sanitize_container("pkg.Widget"), "pkg.Widget");
    }

    #[test]
    fn test_render_creates_nested_output_dir() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("docs/api/v1");

        let written = Renderer::default().render(&[widget()], &out).unwrap();
        assert_eq!(written, vec![out.join("Widget.md")]);
        assert!(out.join("Widget.md").is_file());
    }

    #[test]
    fn test_overwrite_policy_keeps_last() {
        let dir = TempDir::new().unwrap();
        let first = ApiEntry::new("a.py", LanguageTag::Python, "shared", ContainerKind::Module);
        let second = ApiEntry::new("b.go", LanguageTag::Go, "shared", ContainerKind::Module);

        let renderer = Renderer::default().with_policy(CollisionPolicy::Overwrite);
        let written = renderer.render(&[first, second.clone()], dir.path()).unwrap();

        assert_eq!(written, vec![dir.path().join("shared.md"), dir.path().join("shared.md")]);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
        let content = fs::read_to_string(dir.path().join("shared.md")).unwrap();
        assert_eq!(content, Template::builtin().fill(&second));
    }

    #[test]
    fn test_disambiguate_policy_keeps_both() {
        let dir = TempDir::new().unwrap();
        let first = ApiEntry::new("a.py", LanguageTag::Python, "shared", ContainerKind::Module);
        let second = ApiEntry::new("b.go", LanguageTag::Go, "shared", ContainerKind::Module);
        let third = second.clone();

        let written = Renderer::default().render(&[first, second.clone(), third], dir.path()).unwrap();

        let suffix = origin_hash(&second);
        assert_eq!(
            written,
            vec![
                dir.path().join("shared.md"),
                dir.path().join(format!("shared-{}.md", suffix)),
                dir.path().join(format!("shared-{}-2.md", suffix)),
            ]
        );
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 3);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("Overwrite".parse::<CollisionPolicy>().unwrap(), CollisionPolicy::Overwrite);
        assert!("merge".parse::<CollisionPolicy>().is_err());
    }
}
