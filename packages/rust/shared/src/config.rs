//! Application configuration for Galaxy.
//!
//! Project config lives at `./galaxy.toml` (relative to the working directory).
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GalaxyError, Result};
use crate::types::DEFAULT_CATEGORY;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "galaxy.toml";

// ---------------------------------------------------------------------------
// Config structs (matching galaxy.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Content corpus settings.
    #[serde(default)]
    pub content: ContentConfig,

    /// Artifact output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[content]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Root directory of the markdown corpus.
    #[serde(default = "default_content_root")]
    pub root: String,

    /// File extension of documents (without the dot).
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Category assigned to documents without one in their front-matter.
    #[serde(default = "default_category")]
    pub default_category: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_content_root(),
            extension: default_extension(),
            default_category: default_category(),
        }
    }
}

fn default_content_root() -> String {
    "src/content".into()
}
fn default_extension() -> String {
    "md".into()
}
fn default_category() -> String {
    DEFAULT_CATEGORY.into()
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Path of the generated graph artifact.
    #[serde(default = "default_output_file")]
    pub file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: default_output_file(),
        }
    }
}

fn default_output_file() -> String {
    "public/galaxy-data.json".into()
}

// ---------------------------------------------------------------------------
// Graph config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime generation configuration, merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Root directory of the markdown corpus.
    pub content_root: PathBuf,
    /// Document file extension (without the dot).
    pub extension: String,
    /// Fallback category for documents without one.
    pub default_category: String,
    /// Artifact destination.
    pub output_file: PathBuf,
    /// Build the graph without writing the artifact.
    pub dry_run: bool,
}

impl From<&AppConfig> for GraphConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            content_root: PathBuf::from(&config.content.root),
            extension: config.content.extension.trim_start_matches('.').to_string(),
            default_category: config.content.default_category.clone(),
            output_file: PathBuf::from(&config.output.file),
            dry_run: false,
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the project config file (`./galaxy.toml`).
pub fn config_file_path() -> PathBuf {
    PathBuf::from(CONFIG_FILE_NAME)
}

/// Load the project config from the working directory. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path();

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| GalaxyError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        GalaxyError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Write a default config file at `path`. Refuses to overwrite an existing file.
pub fn init_config(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return Err(GalaxyError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| GalaxyError::io(parent, e))?;
    }

    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| GalaxyError::config(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| GalaxyError::io(path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path.to_path_buf())
}

fn validate_config(config: &AppConfig) -> Result<()> {
    if config.content.root.trim().is_empty() {
        return Err(GalaxyError::config("content.root must not be empty"));
    }
    if config.content.extension.trim_start_matches('.').is_empty() {
        return Err(GalaxyError::config("content.extension must not be empty"));
    }
    if config.output.file.trim().is_empty() {
        return Err(GalaxyError::config("output.file must not be empty"));
    }
    Ok(())
}
