//! Application configuration for taxsubset.
//!
//! User config lives at `~/.taxsubset/taxsubset.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TaxsubsetError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "taxsubset.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".taxsubset";

/// The Google Product Taxonomy endpoint.
pub const DEFAULT_SOURCE_URL: &str =
    "https://www.google.com/basepages/producttype/taxonomy-with-ids.en-US.txt";

// ---------------------------------------------------------------------------
// Config structs (matching taxsubset.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Taxonomy source settings.
    #[serde(default)]
    pub source: SourceConfig,

    /// Output file settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Subset curation settings.
    #[serde(default)]
    pub subset: SubsetConfig,
}

/// `[source]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Taxonomy URL to fetch.
    #[serde(default = "default_source_url")]
    pub url: String,

    /// HTTP timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Disable TLS certificate verification for the fetch.
    /// Off by default; only enable when the endpoint's certificate chain is
    /// known broken.
    #[serde(default)]
    pub insecure: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            timeout_secs: default_timeout_secs(),
            insecure: false,
        }
    }
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.into()
}
fn default_timeout_secs() -> u64 {
    30
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Path of the subset JSON file, relative to the working directory.
    #[serde(default = "default_output_path")]
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn default_output_path() -> String {
    "public/taxonomy-subset.json".into()
}

/// `[subset]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsetConfig {
    /// Minimum category count before the fallback list is consulted.
    #[serde(default = "default_min_categories")]
    pub min_categories: usize,

    /// Maximum category count in the written subset.
    #[serde(default = "default_max_categories")]
    pub max_categories: usize,

    /// Description stored in the output record.
    #[serde(default = "default_description")]
    pub description: String,

    /// `lastUpdated` literal stored in the output record.
    #[serde(default = "default_last_updated")]
    pub last_updated: String,
}

impl Default for SubsetConfig {
    fn default() -> Self {
        Self {
            min_categories: default_min_categories(),
            max_categories: default_max_categories(),
            description: default_description(),
            last_updated: default_last_updated(),
        }
    }
}

fn default_min_categories() -> usize {
    15
}
fn default_max_categories() -> usize {
    20
}
fn default_description() -> String {
    "Curated subset of Google Product Taxonomy for electronics recommerce".into()
}
fn default_last_updated() -> String {
    "2024-01-15".into()
}

// ---------------------------------------------------------------------------
// Run config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime pipeline configuration — merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Taxonomy URL to fetch.
    pub source_url: String,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
    /// Disable TLS certificate verification.
    pub insecure: bool,
    /// Output file path.
    pub output_path: PathBuf,
    /// Minimum category count before padding with fallbacks.
    pub min_categories: usize,
    /// Maximum category count in the output.
    pub max_categories: usize,
    /// Description for the output record.
    pub description: String,
    /// `lastUpdated` literal for the output record.
    pub last_updated: String,
}

impl From<&AppConfig> for RunConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            source_url: config.source.url.clone(),
            timeout_secs: config.source.timeout_secs,
            insecure: config.source.insecure,
            output_path: PathBuf::from(&config.output.path),
            min_categories: config.subset.min_categories,
            max_categories: config.subset.max_categories,
            description: config.subset.description.clone(),
            last_updated: config.subset.last_updated.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.taxsubset/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| TaxsubsetError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.taxsubset/taxsubset.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| TaxsubsetError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| TaxsubsetError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| TaxsubsetError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| TaxsubsetError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| TaxsubsetError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
