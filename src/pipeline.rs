//! API model normalizer
//!
//! Groups manifest sources by language, hands each group to its handler and
//! concatenates the results. Groups are visited in alphabetical order of their
//! language tag, so the model is reproducible run to run.

use crate::adapter::{AdapterRegistry, Extraction};
use crate::language::LanguageTag;
use crate::model::{ApiModel, Manifest};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Output of one extraction run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiReport {
    pub api_model: ApiModel,
    /// Files an adapter could not read; they contribute no entries
    #[serde(default)]
    pub skipped: Vec<PathBuf>,
}

/// One language and its files, in manifest order.
pub type LanguageGroup = (LanguageTag, Vec<PathBuf>);

/// Group sources by language in canonical (alphabetical) order.
pub fn group_by_language(manifest: &Manifest) -> Vec<LanguageGroup> {
    let mut groups: BTreeMap<&'static str, LanguageGroup> = BTreeMap::new();
    for source in &manifest.sources {
        groups
            .entry(source.language.as_str())
            .or_insert_with(|| (source.language, Vec::new()))
            .1
            .push(source.path.clone());
    }
    groups.into_values().collect()
}

/// Drives extraction over a registry
pub struct Extractor<'a> {
    registry: &'a AdapterRegistry,
    parallel: bool,
}

impl<'a> Extractor<'a> {
    pub fn new(registry: &'a AdapterRegistry) -> Self {
        Self { registry, parallel: false }
    }

    /// Extract language groups on separate threads
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn run(&self, manifest: &Manifest) -> ApiReport {
        let groups = group_by_language(manifest);
        let results = if self.parallel && groups.len() > 1 {
            self.run_parallel(&groups)
        } else {
            groups.iter().map(|group| self.run_group(group)).collect()
        };

        let mut combined = Extraction::new();
        for result in results {
            combined.merge(result);
        }

        tracing::info!(
            "Extracted {} containers from {} files ({} skipped)",
            combined.entries.len(),
            manifest.sources.len(),
            combined.skipped.len()
        );

        ApiReport {
            api_model: combined.entries,
            skipped: combined.skipped,
        }
    }

    fn run_group(&self, (language, files): &LanguageGroup) -> Extraction {
        let handler = self.registry.resolve(*language);
        tracing::debug!(
            "Dispatching {} {} files to {} adapter",
            files.len(),
            language,
            if handler.is_fallback() { "fallback" } else { "dedicated" }
        );
        handler.extract(files)
    }

    /// Adapters share no state, so groups run independently and are re-joined in order.
    fn run_parallel(&self, groups: &[LanguageGroup]) -> Vec<Extraction> {
        let joined = crossbeam::scope(|scope| {
            let handles: Vec<_> = groups
                .iter()
                .map(|group| scope.spawn(move |_| self.run_group(group)))
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                .collect::<Vec<_>>()
        });

        joined.unwrap_or_else(|panic| std::panic::resume_unwind(panic))
    }
}

/// Extract the API model of a manifest with the given registry
pub fn extract_api(manifest: &Manifest, registry: &AdapterRegistry) -> ApiReport {
    Extractor::new(registry).run(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::default_registry;
    use crate::model::{ContainerKind, SourceFile};
    use std::fs;
    use tempfile::TempDir;

    fn source(path: PathBuf, language: LanguageTag) -> SourceFile {
        SourceFile { path, language }
    }

    #[test]
    fn test_groups_are_alphabetical() {
        let manifest = Manifest {
            sources: vec![
                source("b.py".into(), LanguageTag::Python),
                source("a.cs".into(), LanguageTag::Csharp),
                source("c.rb".into(), LanguageTag::Ruby),
                source("a.py".into(), LanguageTag::Python),
                source("x.go".into(), LanguageTag::Go),
            ],
            doc_dirs: Vec::new(),
        };

        let groups = group_by_language(&manifest);
        let order: Vec<_> = groups.iter().map(|(tag, _)| *tag).collect();
        assert_eq!(order, vec![LanguageTag::Csharp, LanguageTag::Go, LanguageTag::Python, LanguageTag::Ruby]);
        assert_eq!(groups[2].1, vec![PathBuf::from("b.py"), PathBuf::from("a.py")]);
    }

    #[test]
    fn test_every_file_reaches_one_handler() {
        let dir = TempDir::new().unwrap();
        let py = dir.path().join("tool.py");
        let rb = dir.path().join("tool.rb");
        let kt = dir.path().join("Tool.kt");
        let unreadable = dir.path().join("gone.py");
        fs::write(&py, "def run():\n    pass\n").unwrap();
        fs::write(&rb, "class Tool; end\n").unwrap();
        fs::write(&kt, "class Tool\n").unwrap();

        let manifest = Manifest {
            sources: vec![
                source(rb.clone(), LanguageTag::Ruby),
                source(py.clone(), LanguageTag::Python),
                source(unreadable.clone(), LanguageTag::Python),
                source(kt.clone(), LanguageTag::Kotlin),
            ],
            doc_dirs: Vec::new(),
        };

        let registry = default_registry();
        let report = extract_api(&manifest, &registry);

        let summary: Vec<_> = report
            .api_model
            .iter()
            .map(|e| (e.language, e.container.as_str(), e.container_kind))
            .collect();
        assert_eq!(
            summary,
            vec![
                (LanguageTag::Kotlin, "Tool.kt", ContainerKind::File),
                (LanguageTag::Python, "tool", ContainerKind::Module),
                (LanguageTag::Ruby, "tool.rb", ContainerKind::File),
            ]
        );
        assert_eq!(report.skipped, vec![unreadable]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let dir = TempDir::new().unwrap();
        let mut sources = Vec::new();
        for (name, body, tag) in [
            ("a.go", "func Alpha() {}\n", LanguageTag::Go),
            ("b.py", "class B(object):\n    pass\n", LanguageTag::Python),
            ("c.ts", "export class C {}\n", LanguageTag::Typescript),
            ("d.php", "<?php\n", LanguageTag::Php),
        ] {
            let path = dir.path().join(name);
            fs::write(&path, body).unwrap();
            sources.push(source(path, tag));
        }
        let manifest = Manifest { sources, doc_dirs: Vec::new() };

        let registry = default_registry();
        let sequential = Extractor::new(&registry).run(&manifest);
        let parallel = Extractor::new(&registry).parallel(true).run(&manifest);
        assert_eq!(sequential, parallel);
        assert_eq!(sequential.api_model.len(), 4);
    }

    #[test]
    fn test_empty_manifest() {
        let registry = default_registry();
        let report = extract_api(&Manifest::default(), &registry);
        assert!(report.api_model.is_empty());
        assert!(report.skipped.is_empty());
    }
}
