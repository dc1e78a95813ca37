use docpipe::render::{Template, NO_MEMBERS};
use docpipe::{
    build_manifest, default_registry, extract_api, ApiEntry, ApiMember, CollisionPolicy, ContainerKind,
    LanguageTag, MemberKind, Renderer, ScanOptions,
};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

fn sample_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "app/widget.py", "class Widget(Base):\n    pass\n\ndef run():\n    pass\n\ndef _helper():\n    pass\n");
    write(dir.path(), "app/foo.go", "package app\n\nfunc Foo() {}\n\nfunc bar() {}\n");
    write(dir.path(), "app/empty.ts", "const x = 1;\n");
    write(dir.path(), "scripts/deploy.rb", "def deploy; end\n");
    write(dir.path(), "docs/guide.md", "# Guide\n");
    write(dir.path(), "node_modules/pkg/index.js", "export function hidden() {}\n");
    dir
}

#[test]
fn classify_extract_scenarios() {
    let repo = sample_repo();
    let manifest = build_manifest(repo.path(), &ScanOptions::default());

    assert_eq!(manifest.sources.len(), 4);
    assert_eq!(manifest.doc_dirs, vec![repo.path().join("docs")]);
    assert!(manifest.sources.iter().all(|s| s.language != LanguageTag::Unknown));

    let report = extract_api(&manifest, &default_registry());
    assert!(report.skipped.is_empty());

    // go < python < ruby < typescript; the TypeScript file has no exports and vanishes
    let summary: Vec<_> = report
        .api_model
        .iter()
        .map(|e| (e.language, e.container.as_str(), e.container_kind))
        .collect();
    assert_eq!(
        summary,
        vec![
            (LanguageTag::Go, "foo.go", ContainerKind::Module),
            (LanguageTag::Python, "widget.Widget", ContainerKind::Class),
            (LanguageTag::Python, "widget", ContainerKind::Module),
            (LanguageTag::Ruby, "deploy.rb", ContainerKind::File),
        ]
    );

    let go_members: Vec<_> = report.api_model[0].members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(go_members, vec!["Foo"]);
    assert!(report.api_model[1].members.is_empty());
    let py_members: Vec<_> = report.api_model[2].members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(py_members, vec!["run"]);
    assert!(report.api_model[3].members.is_empty());
}

#[test]
fn render_single_widget_page() {
    let out = TempDir::new().unwrap();
    let entry = ApiEntry::new("w.cs", LanguageTag::Csharp, "Widget", ContainerKind::Class)
        .with_members(vec![ApiMember::public("sum", MemberKind::Method)]);

    let written = Renderer::default().render(&[entry], out.path()).unwrap();
    assert_eq!(written, vec![out.path().join("Widget.md")]);

    let page = fs::read_to_string(out.path().join("Widget.md")).unwrap();
    assert!(page.lines().any(|l| l == "- `sum(...)` —"));
    for token in ["{{CONTAINER_KIND}}", "{{CONTAINER}}", "{{LANGUAGE}}", "{{SUMMARY}}", "{{MEMBERS_SECTION}}"] {
        assert!(!page.contains(token));
    }
}

#[test]
fn rendering_is_deterministic_and_idempotent() {
    let repo = sample_repo();
    let manifest = build_manifest(repo.path(), &ScanOptions::default());
    let model = extract_api(&manifest, &default_registry()).api_model;
    let renderer = Renderer::new(Template::builtin());

    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let written_first = renderer.render(&model, first.path()).unwrap();
    let written_second = renderer.render(&model, second.path()).unwrap();

    for (a, b) in written_first.iter().zip(&written_second) {
        assert_eq!(a.file_name(), b.file_name());
        assert_eq!(fs::read(a).unwrap(), fs::read(b).unwrap());
    }

    let again = renderer.render(&model, first.path()).unwrap();
    let set_a: BTreeSet<_> = written_first.into_iter().collect();
    let set_b: BTreeSet<_> = again.into_iter().collect();
    assert_eq!(set_a, set_b);

    let stub = fs::read_to_string(first.path().join("deploy.rb.md")).unwrap();
    assert!(stub.contains(NO_MEMBERS));
}

#[test]
fn colliding_containers_last_writer_wins_under_overwrite() {
    let out = TempDir::new().unwrap();
    let python = ApiEntry::new("a/util.py", LanguageTag::Python, "util", ContainerKind::Module)
        .with_members(vec![ApiMember::public("first", MemberKind::Function)]);
    let rust = ApiEntry::new("b/util.rs", LanguageTag::Rust, "util", ContainerKind::Module)
        .with_members(vec![ApiMember::public("second", MemberKind::Function)]);

    let renderer = Renderer::default().with_policy(CollisionPolicy::Overwrite);
    renderer.render(&[python, rust], out.path()).unwrap();

    let files: Vec<_> = fs::read_dir(out.path()).unwrap().map(|e| e.unwrap().file_name()).collect();
    assert_eq!(files, vec![std::ffi::OsString::from("util.md")]);
    let page = fs::read_to_string(out.path().join("util.md")).unwrap();
    assert!(page.contains("second(...)"));
    assert!(!page.contains("first(...)"));
}

#[test]
fn colliding_containers_are_kept_apart_by_default() {
    let out = TempDir::new().unwrap();
    let python = ApiEntry::new("a/util.py", LanguageTag::Python, "util", ContainerKind::Module);
    let rust = ApiEntry::new("b/util.rs", LanguageTag::Rust, "util", ContainerKind::Module);

    let written = Renderer::default().render(&[python, rust], out.path()).unwrap();
    assert_eq!(written.len(), 2);
    assert_ne!(written[0], written[1]);
    assert_eq!(written[0], out.path().join("util.md"));
    assert!(written.iter().all(|p| p.is_file()));
}

#[test]
fn empty_batches_and_fallback_stubs() {
    let registry = default_registry();
    for tag in [LanguageTag::Python, LanguageTag::Go, LanguageTag::Csharp, LanguageTag::Swift] {
        assert!(registry.resolve(tag).extract(&[]).entries.is_empty());
    }

    let dir = TempDir::new().unwrap();
    write(dir.path(), "plain.py", "# nothing here\n");
    write(dir.path(), "plain.swift", "// nothing here\n");

    let py = registry.resolve(LanguageTag::Python).extract(&[dir.path().join("plain.py")]);
    assert!(py.entries.is_empty());

    let swift = registry.resolve(LanguageTag::Swift).extract(&[dir.path().join("plain.swift")]);
    assert_eq!(swift.entries.len(), 1);
    assert_eq!(swift.entries[0].container, "plain.swift");
    assert_eq!(swift.entries[0].container_kind, ContainerKind::File);
    assert!(swift.entries[0].members.is_empty());
}
