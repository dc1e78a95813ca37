//! Language tags
//!
//! Every source file is classified into one tag, purely from its extension.
//! Extensions outside the table resolve to `Unknown`; classification never fails.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Implementation language of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    Csharp,
    Typescript,
    Javascript,
    Python,
    Java,
    Go,
    Rust,
    Cpp,
    C,
    Kotlin,
    Swift,
    Ruby,
    Php,
    /// Anything outside the table, including unrecognized names on the wire
    #[serde(other)]
    Unknown,
}

/// Static extension table (lowercase, without the dot).
const EXTENSIONS: &[(&str, LanguageTag)] = &[
    ("cs", LanguageTag::Csharp),
    ("ts", LanguageTag::Typescript),
    ("tsx", LanguageTag::Typescript),
    ("js", LanguageTag::Javascript),
    ("jsx", LanguageTag::Javascript),
    ("py", LanguageTag::Python),
    ("java", LanguageTag::Java),
    ("go", LanguageTag::Go),
    ("rb", LanguageTag::Ruby),
    ("php", LanguageTag::Php),
    ("rs", LanguageTag::Rust),
    ("cpp", LanguageTag::Cpp),
    ("cxx", LanguageTag::Cpp),
    ("cc", LanguageTag::Cpp),
    ("c", LanguageTag::C),
    ("kt", LanguageTag::Kotlin),
    ("swift", LanguageTag::Swift),
];

impl LanguageTag {
    /// Get the string representation used on the wire and in rendered pages
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageTag::Csharp => "csharp",
            LanguageTag::Typescript => "typescript",
            LanguageTag::Javascript => "javascript",
            LanguageTag::Python => "python",
            LanguageTag::Java => "java",
            LanguageTag::Go => "go",
            LanguageTag::Rust => "rust",
            LanguageTag::Cpp => "cpp",
            LanguageTag::C => "c",
            LanguageTag::Kotlin => "kotlin",
            LanguageTag::Swift => "swift",
            LanguageTag::Ruby => "ruby",
            LanguageTag::Php => "php",
            LanguageTag::Unknown => "unknown",
        }
    }

    /// Map a bare extension (no dot, any case) to a tag.
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.to_ascii_lowercase();
        EXTENSIONS
            .iter()
            .find(|(e, _)| *e == ext)
            .map(|(_, tag)| *tag)
            .unwrap_or(LanguageTag::Unknown)
    }

    /// Infer the tag of a path from its extension.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(LanguageTag::Unknown)
    }

    pub fn is_known(&self) -> bool {
        *self != LanguageTag::Unknown
    }
}

impl FromStr for LanguageTag {
    type Err = std::convert::Infallible;

    /// Unrecognized names map to `Unknown`, mirroring extension lookup.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        let tag = match lowered.as_str() {
            "csharp" => LanguageTag::Csharp,
            "typescript" => LanguageTag::Typescript,
            "javascript" => LanguageTag::Javascript,
            "python" => LanguageTag::Python,
            "java" => LanguageTag::Java,
            "go" => LanguageTag::Go,
            "rust" => LanguageTag::Rust,
            "cpp" => LanguageTag::Cpp,
            "c" => LanguageTag::C,
            "kotlin" => LanguageTag::Kotlin,
            "swift" => LanguageTag::Swift,
            "ruby" => LanguageTag::Ruby,
            "php" => LanguageTag::Php,
            _ => LanguageTag::Unknown,
        };
        Ok(tag)
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
