//! JSON-lines request server
//!
//! Reads one JSON request per line and answers with one JSON object per line.
//! Requests look like `{"tool": "extract_api", "params": {...}}`. Any failure,
//! from bad JSON to a missing template, becomes `{"error": "..."}` and the loop
//! keeps serving.

use crate::adapter::{default_registry, AdapterRegistry};
use crate::config::{default_docs_root, DocpipeConfig};
use crate::inventory::scan_docs;
use crate::manifest::{build_manifest, ScanOptions};
use crate::model::{ApiModel, Manifest};
use crate::pipeline::Extractor;
use crate::{Error, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Operations the server exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    BuildManifest,
    ScanDocs,
    ExtractApi,
    RenderApiDocs,
}

impl Tool {
    /// Accepts short names and their qualified aliases
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "build_manifest" | "doc_manifest.build_manifest" => Ok(Tool::BuildManifest),
            "scan_docs" | "doc_inventory.scan_docs" => Ok(Tool::ScanDocs),
            "extract_api" | "multi_lang_api_extractor.extract_api" => Ok(Tool::ExtractApi),
            "render_api_docs" | "markdown_renderer.render_api_docs" => Ok(Tool::RenderApiDocs),
            _ => Err(Error::UnknownTool(name.to_string())),
        }
    }
}

#[derive(Deserialize)]
struct Request {
    tool: String,
    #[serde(default)]
    params: Option<Value>,
}

#[derive(Deserialize, Default)]
struct RootArgs {
    root: Option<PathBuf>,
}

#[derive(Deserialize, Default)]
struct ExtractArgs {
    root: Option<PathBuf>,
    manifest: Option<Manifest>,
}

#[derive(Deserialize, Default)]
struct RenderArgs {
    root: Option<PathBuf>,
    api_model: Option<ApiModel>,
    docs_root: Option<PathBuf>,
}

fn parse_args<T: for<'de> Deserialize<'de> + Default>(params: Option<Value>) -> Result<T> {
    match params {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => serde_json::from_value(value).map_err(|e| Error::InvalidRequest(e.to_string())),
    }
}

/// Request dispatcher bound to an explicit configuration
#[derive(Clone)]
pub struct Service {
    config: DocpipeConfig,
    registry: Arc<AdapterRegistry>,
}

impl Service {
    pub fn new(config: DocpipeConfig) -> Self {
        Self {
            config,
            registry: Arc::new(default_registry()),
        }
    }

    fn scan_options(&self) -> ScanOptions {
        ScanOptions::with_excludes(self.config.exclude.clone())
    }

    fn root_or_default(&self, root: Option<PathBuf>) -> PathBuf {
        root.unwrap_or_else(|| self.config.root())
    }

    /// Dispatch one decoded request
    pub fn handle(&self, tool: Tool, params: Option<Value>) -> Result<Value> {
        match tool {
            Tool::BuildManifest => {
                let args: RootArgs = parse_args(params)?;
                let root = self.root_or_default(args.root);
                Ok(serde_json::to_value(build_manifest(&root, &self.scan_options()))?)
            }
            Tool::ScanDocs => {
                let args: RootArgs = parse_args(params)?;
                let root = self.root_or_default(args.root);
                Ok(json!({ "docs": scan_docs(&root) }))
            }
            Tool::ExtractApi => {
                let args: ExtractArgs = parse_args(params)?;
                let manifest = match args.manifest {
                    Some(manifest) => manifest,
                    None => build_manifest(&self.root_or_default(args.root), &self.scan_options()),
                };
                let report = Extractor::new(&self.registry)
                    .parallel(self.config.parallel)
                    .run(&manifest);
                Ok(serde_json::to_value(report)?)
            }
            Tool::RenderApiDocs => {
                let args: RenderArgs = parse_args(params)?;
                let docs_root = match (args.docs_root, args.root) {
                    (Some(docs_root), _) => docs_root,
                    (None, Some(root)) => default_docs_root(&root),
                    (None, None) => self.config.docs_root(),
                };
                let renderer = self.config.renderer()?;
                let generated = renderer.render(&args.api_model.unwrap_or_default(), &docs_root)?;
                Ok(json!({ "generated_files": generated }))
            }
        }
    }

    /// Turn one input line into one response object
    pub fn handle_line(&self, line: &str) -> Value {
        let outcome = serde_json::from_str::<Request>(line)
            .map_err(|e| Error::InvalidRequest(e.to_string()))
            .and_then(|request| {
                let tool = Tool::from_name(&request.tool)?;
                tracing::debug!("Handling {:?}", tool);
                self.handle(tool, request.params)
            });

        match outcome {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Request failed: {}", e);
                json!({ "error": e.to_string() })
            }
        }
    }

    /// Serve requests until the reader is exhausted
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }

            let service = self.clone();
            let response = tokio::task::spawn_blocking(move || service.handle_line(&line))
                .await
                .unwrap_or_else(|e| json!({ "error": format!("request aborted: {}", e) }));

            let mut encoded = serde_json::to_string(&response)?;
            encoded.push('\n');
            writer.write_all(encoded.as_bytes()).await?;
            writer.flush().await?;
        }
        Ok(())
    }

    /// Serve on the process's stdin/stdout
    pub async fn run_stdio(&self) -> Result<()> {
        tracing::info!("Docpipe server started on stdio");
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        self.serve(stdin, tokio::io::stdout()).await
    }
}
