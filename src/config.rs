use crate::render::{CollisionPolicy, Renderer, Template};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DocpipeConfig {
    /// Repository root to scan
    pub root: Option<PathBuf>,
    /// Where generated pages go; defaults to `<root>/docs/api`
    pub docs_root: Option<PathBuf>,
    /// Custom page template; the built-in one is used when unset
    pub template: Option<PathBuf>,
    /// Extra gitignore-style exclude patterns
    #[serde(default)]
    pub exclude: Vec<String>,
    pub collision: Option<CollisionPolicy>,
    #[serde(default)]
    pub parallel: bool,
}

impl DocpipeConfig {
    pub fn root(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn docs_root(&self) -> PathBuf {
        self.docs_root
            .clone()
            .unwrap_or_else(|| default_docs_root(&self.root()))
    }

    /// Build the renderer this config describes
    pub fn renderer(&self) -> crate::Result<Renderer> {
        let template = match &self.template {
            Some(path) => Template::load(path)?,
            None => Template::builtin(),
        };
        Ok(Renderer::new(template).with_policy(self.collision.unwrap_or_default()))
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("docpipe.toml")
}

pub fn default_docs_root(root: &Path) -> PathBuf {
    root.join("docs").join("api")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<DocpipeConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: DocpipeConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &DocpipeConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}
