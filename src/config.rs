//! Configuration for prepcat.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (PREPCAT_CONTENT, PREPCAT_EXAM)
//! 2. Config file (.prepcat/config.yaml)
//! 3. Defaults (~/.prepcat/content)
//!
//! Config file discovery:
//! - Searches current directory and parents for .prepcat/config.yaml
//! - Paths in config file are relative to the project root (parent of .prepcat/)

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use crate::catalog::DuplicatePolicy;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

const CONFIG_DIR: &str = ".prepcat";
const CONFIG_FILE: &str = "config.yaml";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Content root (relative to the project root)
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
    /// Exam used when a command does not name one
    pub default_exam: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Directory holding content packs
    pub content_root: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    pub duplicate_policy: DuplicatePolicy,
    pub default_exam: Option<String>,
}

/// Values read from the environment
#[derive(Debug, Clone, Default)]
struct EnvOverrides {
    content: Option<String>,
    exam: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            content: std::env::var("PREPCAT_CONTENT").ok().filter(|s| !s.is_empty()),
            exam: std::env::var("PREPCAT_EXAM").ok().filter(|s| !s.is_empty()),
        }
    }
}

/// Find config file by searching a directory and its parents
fn find_config_file_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

fn find_config_file() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_file_from(&cwd)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

fn default_content_root() -> Result<PathBuf> {
    Ok(dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(CONFIG_DIR)
        .join("content"))
}

fn resolve(config_file: Option<PathBuf>, env: EnvOverrides) -> Result<ResolvedConfig> {
    let (file_content, catalog) = match config_file {
        Some(ref config_path) => {
            let config = load_config_file(config_path)?;

            // Project root is the parent of .prepcat/
            let base_dir = config_path
                .parent()
                .and_then(|p| p.parent())
                .unwrap_or(Path::new("."));

            let content = config
                .paths
                .content
                .as_deref()
                .map(|p| resolve_path(base_dir, p));

            (content, config.catalog)
        }
        None => (None, CatalogConfig::default()),
    };

    let content_root = match (env.content, file_content) {
        (Some(env_content), _) => PathBuf::from(env_content),
        (None, Some(content)) => content,
        (None, None) => default_content_root()?,
    };

    Ok(ResolvedConfig {
        content_root,
        config_file,
        duplicate_policy: catalog.duplicate_policy,
        default_exam: env.exam.or(catalog.default_exam),
    })
}

/// Like [`resolve`], but a config file that cannot be read or parsed is
/// skipped with a warning; environment and defaults still apply
fn resolve_lenient(config_file: Option<PathBuf>, env: EnvOverrides) -> Result<ResolvedConfig> {
    match resolve(config_file, env.clone()) {
        Ok(config) => Ok(config),
        Err(e) => {
            warn!(error = %format!("{:#}", e), "Ignoring unusable config file");
            resolve(None, env)
        }
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    resolve(find_config_file(), EnvOverrides::from_env())
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Configuration for callers that override the content root themselves.
///
/// A broken config file does not stop them; see [`resolve_lenient`].
pub fn lenient_config() -> Result<ResolvedConfig> {
    match config() {
        Ok(config) => Ok(config.clone()),
        Err(_) => resolve_lenient(find_config_file(), EnvOverrides::from_env()),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

/// Get the content root directory
pub fn content_root() -> Result<PathBuf> {
    Ok(config()?.content_root.clone())
}
