//! Configuration loading and root folder resolution
//!
//! Bootstrap configuration comes from an optional TOML file. Every field has a
//! compiled default, so a missing file never prevents startup.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "OSCARS_ROOT_FOLDER";

/// Environment variable carrying the OMDb API key
pub const OMDB_API_KEY_ENV: &str = "OSCARS_OMDB_API_KEY";

/// Application directory name used under the platform config/data dirs
const APP_DIR_NAME: &str = "oscars-ranker";

const DATABASE_FILE_NAME: &str = "awards_movies.sqlite";
const CACHE_FILE_NAME: &str = "final_project_cache.json";

/// Built-in defaults used when neither CLI, environment nor TOML supply a value
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
    pub log_level: String,
    pub datapackage_url: String,
    pub resource_type: String,
    pub omdb_base_url: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub min_request_interval_ms: u64,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            root_folder: default_root_folder(),
            log_level: "info".to_string(),
            datapackage_url:
                "https://datahub.io/rufuspollock/oscars-nominees-and-winners/datapackage.json"
                    .to_string(),
            resource_type: "derived/csv".to_string(),
            omdb_base_url: "http://www.omdbapi.com/".to_string(),
            request_timeout_secs: 30,
            max_retries: 2,
            retry_backoff_ms: 500,
            min_request_interval_ms: 100,
        }
    }
}

/// Logging section of the TOML file
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct TomlConfig {
    /// Folder holding the SQLite store and the JSON cache
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// OMDb API key (environment variable takes precedence)
    #[serde(default)]
    pub omdb_api_key: Option<String>,

    #[serde(default)]
    pub omdb_base_url: Option<String>,

    /// Data package descriptor for the nominations dataset
    #[serde(default)]
    pub datapackage_url: Option<String>,

    /// `datahub.type` of the resource to read from the data package
    #[serde(default)]
    pub resource_type: Option<String>,

    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    #[serde(default)]
    pub max_retries: Option<u32>,

    #[serde(default)]
    pub retry_backoff_ms: Option<u64>,

    #[serde(default)]
    pub min_request_interval_ms: Option<u64>,
}

impl TomlConfig {
    /// Parse TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
    }

    /// Load configuration from `path`, or from the platform default location.
    ///
    /// A missing file yields defaults with a warning. A file that exists but
    /// cannot be read or parsed is a configuration error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) => p,
                None => {
                    warn!("Could not determine config directory, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        if !path.exists() {
            warn!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Read TOML failed: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn datapackage_url(&self, defaults: &CompiledDefaults) -> String {
        self.datapackage_url
            .clone()
            .unwrap_or_else(|| defaults.datapackage_url.clone())
    }

    pub fn resource_type(&self, defaults: &CompiledDefaults) -> String {
        self.resource_type
            .clone()
            .unwrap_or_else(|| defaults.resource_type.clone())
    }

    pub fn omdb_base_url(&self, defaults: &CompiledDefaults) -> String {
        self.omdb_base_url
            .clone()
            .unwrap_or_else(|| defaults.omdb_base_url.clone())
    }

    pub fn request_timeout_secs(&self, defaults: &CompiledDefaults) -> u64 {
        self.request_timeout_secs
            .unwrap_or(defaults.request_timeout_secs)
    }

    pub fn max_retries(&self, defaults: &CompiledDefaults) -> u32 {
        self.max_retries.unwrap_or(defaults.max_retries)
    }

    pub fn retry_backoff_ms(&self, defaults: &CompiledDefaults) -> u64 {
        self.retry_backoff_ms.unwrap_or(defaults.retry_backoff_ms)
    }

    pub fn min_request_interval_ms(&self, defaults: &CompiledDefaults) -> u64 {
        self.min_request_interval_ms
            .unwrap_or(defaults.min_request_interval_ms)
    }
}

/// Root folder resolution, highest priority first:
/// 1. Command-line argument
/// 2. `OSCARS_ROOT_FOLDER` environment variable
/// 3. TOML `root_folder`
/// 4. OS-dependent compiled default
#[derive(Debug, Clone, Default)]
pub struct RootFolderResolver {
    cli_arg: Option<PathBuf>,
    toml_root: Option<PathBuf>,
}

impl RootFolderResolver {
    pub fn new(cli_arg: Option<PathBuf>, toml_root: Option<PathBuf>) -> Self {
        Self { cli_arg, toml_root }
    }

    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            return path.clone();
        }

        if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }

        if let Some(path) = &self.toml_root {
            return path.clone();
        }

        default_root_folder()
    }
}

/// Creates the root folder and derives the file locations inside it
#[derive(Debug, Clone)]
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    pub fn root_folder(&self) -> &Path {
        &self.root_folder
    }

    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_folder.exists() {
            std::fs::create_dir_all(&self.root_folder)?;
            info!("Created root folder: {}", self.root_folder.display());
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE_NAME)
    }

    pub fn cache_path(&self) -> PathBuf {
        self.root_folder.join(CACHE_FILE_NAME)
    }
}

/// Platform config file location (`~/.config/oscars-ranker/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join("config.toml"))
}

fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("./oscars_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_defaults_to_info() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.logging.level, "info");
        assert!(config.omdb_api_key.is_none());
    }

    #[test]
    fn test_accessors_fall_back_to_defaults() {
        let defaults = CompiledDefaults::for_current_platform();
        let config = TomlConfig::default();

        assert_eq!(config.resource_type(&defaults), "derived/csv");
        assert_eq!(config.max_retries(&defaults), 2);
        assert_eq!(config.request_timeout_secs(&defaults), 30);
    }

    #[test]
    fn test_initializer_paths() {
        let init = RootFolderInitializer::new(PathBuf::from("/tmp/oscars"));
        assert_eq!(
            init.database_path(),
            PathBuf::from("/tmp/oscars/awards_movies.sqlite")
        );
        assert_eq!(
            init.cache_path(),
            PathBuf::from("/tmp/oscars/final_project_cache.json")
        );
    }
}
