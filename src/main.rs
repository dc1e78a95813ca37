//! Docpipe CLI - multi-language API documentation pipeline

use anyhow::Context;
use clap::{Parser, Subcommand};
use docpipe::config::{self, DocpipeConfig};
use docpipe::server::Service;
use docpipe::ui::{self, Icons};
use docpipe::{build_manifest, default_registry, scan_docs, ApiModel, ApiReport, CollisionPolicy, Extractor, ScanOptions};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "docpipe")]
#[command(version)]
#[command(about = "Multi-language API inventory and Markdown reference generator")]
#[command(long_about = r#"
Docpipe classifies the files of a source tree by language, extracts a
best-effort inventory of their public types and functions, and renders
one Markdown page per container.

Example usage:
  docpipe manifest --path .
  docpipe generate --path . --out docs/api
  docpipe serve < requests.jsonl
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON instead of human output
    #[arg(long, global = true)]
    json: bool,

    /// Path to the config file (defaults to ./docpipe.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify source files and find docs directories
    Manifest {
        /// Repository root (defaults to the configured root)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// List existing Markdown documents
    ScanDocs {
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Extract the normalized API model
    Extract {
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Write the model as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Extract language groups in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// Render pages from a saved API model
    Render {
        /// JSON file holding an API model or an extraction report
        #[arg(short, long)]
        model: PathBuf,

        /// Output directory for pages
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Page template with the five placeholders
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Collision policy: overwrite or disambiguate
        #[arg(long)]
        collision: Option<CollisionPolicy>,
    },

    /// Scan, extract and render in one run
    Generate {
        #[arg(short, long)]
        path: Option<PathBuf>,

        #[arg(short, long)]
        out: Option<PathBuf>,

        #[arg(short, long)]
        template: Option<PathBuf>,

        #[arg(long)]
        collision: Option<CollisionPolicy>,

        #[arg(long)]
        parallel: bool,
    },

    /// Serve JSON-lines requests on stdin/stdout
    Serve,

    /// Write a default docpipe.toml
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries results and server responses
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut settings = config::load_config(cli.config.as_deref())?.unwrap_or_default();

    match cli.command {
        Commands::Manifest { path } => {
            override_root(&mut settings, path);
            let root = settings.root();
            let manifest = build_manifest(&root, &scan_options(&settings));

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&manifest)?);
            } else {
                ui::header(&format!("Manifest for {}", root.display()));
                let mut by_language: BTreeMap<&str, usize> = BTreeMap::new();
                for source in &manifest.sources {
                    *by_language.entry(source.language.as_str()).or_default() += 1;
                }
                print_counts(&by_language);
                for dir in &manifest.doc_dirs {
                    ui::status(Icons::FOLDER, "docs", &dir.display().to_string());
                }
                ui::success(&format!("{} source files", manifest.sources.len()));
            }
        }

        Commands::ScanDocs { path } => {
            override_root(&mut settings, path);
            let docs = scan_docs(&settings.root());

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "docs": docs }))?);
            } else if docs.is_empty() {
                ui::warn("No Markdown documents found.");
            } else {
                for doc in &docs {
                    let kind = serde_json::to_value(doc.kind)?;
                    println!("{} {} {}", Icons::FILE, doc.path.display(), ui::dim(kind.as_str().unwrap_or("")));
                }
            }
        }

        Commands::Extract { path, output, parallel } => {
            override_root(&mut settings, path);
            settings.parallel |= parallel;
            let spinner = (!cli.json).then(|| ui::Spinner::new("Extracting API surface"));
            let report = extract(&settings);
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }

            if let Some(output) = output {
                std::fs::write(&output, serde_json::to_string_pretty(&report)?)
                    .with_context(|| format!("failed to write {}", output.display()))?;
                if !cli.json {
                    ui::success(&format!("Wrote {} containers to {}", report.api_model.len(), output.display()));
                }
            } else if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }

        Commands::Render { model, out, template, collision } => {
            apply_render_flags(&mut settings, out, template, collision);
            let model = load_model(&model)?;
            let renderer = settings.renderer()?;
            let generated = renderer.render(&model, &settings.docs_root())?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "generated_files": generated }))?);
            } else {
                ui::success(&format!("Rendered {} pages into {}", generated.len(), settings.docs_root().display()));
            }
        }

        Commands::Generate { path, out, template, collision, parallel } => {
            override_root(&mut settings, path);
            apply_render_flags(&mut settings, out, template, collision);
            settings.parallel |= parallel;

            // Fail on a bad template before doing any work
            let renderer = settings.renderer()?;
            let started = Instant::now();
            let progress = (!cli.json).then(ui::ProgressManager::new);

            if let Some(p) = &progress {
                p.start_scanning();
            }
            let manifest = build_manifest(&settings.root(), &scan_options(&settings));
            if let Some(p) = &progress {
                p.finish_scanning(manifest.sources.len());
                p.start_extracting();
            }

            let registry = default_registry();
            let report = Extractor::new(&registry).parallel(settings.parallel).run(&manifest);
            if let Some(p) = &progress {
                p.finish_extracting(report.api_model.len());
                p.start_rendering();
            }

            let generated = renderer.render(&report.api_model, &settings.docs_root())?;

            match progress {
                Some(p) => {
                    p.finish_rendering(generated.len());
                    p.finish_with_summary(started.elapsed(), manifest.sources.len(), report.api_model.len(), generated.len());
                    for path in &report.skipped {
                        ui::warn(&format!("Skipped unreadable file {}", path.display()));
                    }
                }
                None => {
                    let data = serde_json::json!({
                        "sources": manifest.sources.len(),
                        "containers": report.api_model.len(),
                        "skipped": report.skipped,
                        "generated_files": generated,
                    });
                    println!("{}", serde_json::to_string_pretty(&data)?);
                }
            }
        }

        Commands::Serve => {
            let runtime = tokio::runtime::Runtime::new()?;
            let service = Service::new(settings);
            runtime.block_on(service.run_stdio())?;
        }

        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            let defaults = DocpipeConfig {
                root: Some(PathBuf::from(".")),
                docs_root: Some(PathBuf::from("docs/api")),
                collision: Some(CollisionPolicy::default()),
                ..Default::default()
            };
            config::write_config(&path, &defaults, force)?;
            ui::success(&format!("Wrote {}", path.display()));
        }
    }

    Ok(())
}

fn override_root(settings: &mut DocpipeConfig, path: Option<PathBuf>) {
    if let Some(path) = path {
        settings.root = Some(path);
    }
}

fn apply_render_flags(
    settings: &mut DocpipeConfig,
    out: Option<PathBuf>,
    template: Option<PathBuf>,
    collision: Option<CollisionPolicy>,
) {
    if out.is_some() {
        settings.docs_root = out;
    }
    if template.is_some() {
        settings.template = template;
    }
    if collision.is_some() {
        settings.collision = collision;
    }
}

fn scan_options(settings: &DocpipeConfig) -> ScanOptions {
    ScanOptions::with_excludes(settings.exclude.clone())
}

fn extract(settings: &DocpipeConfig) -> ApiReport {
    let manifest = build_manifest(&settings.root(), &scan_options(settings));
    let registry = default_registry();
    Extractor::new(&registry).parallel(settings.parallel).run(&manifest)
}

/// Accepts a bare model array or a full extraction report
fn load_model(path: &Path) -> anyhow::Result<ApiModel> {
    let contents = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&contents)?;
    let model = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        serde_json::from_value::<ApiReport>(value)?.api_model
    };
    Ok(model)
}

fn print_counts(counts: &BTreeMap<&str, usize>) {
    let rows: Vec<(String, String)> = counts
        .iter()
        .map(|(label, count)| (label.to_string(), count.to_string()))
        .collect();
    let table = ui::stats_table(&rows);
    if !table.is_empty() {
        println!("{}", table);
    }
}

fn print_report(report: &ApiReport) {
    ui::section("API model");
    for entry in &report.api_model {
        println!(
            "{} {} {} {}",
            Icons::PACKAGE,
            entry.container,
            ui::dim(&format!("[{} {}]", entry.language, entry.container_kind)),
            ui::muted(&format!("{} members", entry.members.len()))
        );
    }

    let mut by_language: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in &report.api_model {
        *by_language.entry(entry.language.as_str()).or_default() += 1;
    }
    print_counts(&by_language);

    for path in &report.skipped {
        ui::status(Icons::SKIP, "skipped", &path.display().to_string());
    }
    ui::summary_row("containers", &report.api_model.len().to_string());
}
