//! Configuration resolution for oscars-ranker
//!
//! The OMDb API key resolves with CLI/ENV → TOML priority. Client settings
//! come from TOML with compiled defaults underneath.

use crate::sources::{AwardsSourceError, DataPackageClient, MovieSourceError, OmdbClient, OmdbSettings};
use crate::utils::RetryPolicy;
use oscars_common::config::{CompiledDefaults, TomlConfig, OMDB_API_KEY_ENV};
use oscars_common::{Error, Result};
use std::time::Duration;
use tracing::{info, warn};

/// Resolve the OMDb API key
///
/// **Priority:** command line / environment → TOML
///
/// `cli_or_env` is the value clap collected from `--omdb-api-key` or
/// `OSCARS_OMDB_API_KEY`.
pub fn resolve_omdb_api_key(cli_or_env: Option<&str>, toml_config: &TomlConfig) -> Result<String> {
    let env_key = cli_or_env.filter(|k| is_valid_key(k));
    let toml_key = toml_config
        .omdb_api_key
        .as_deref()
        .filter(|k| is_valid_key(k));

    if env_key.is_some() && toml_key.is_some() {
        warn!("OMDb API key found on command line/environment and in TOML. Using command line/environment.");
    }

    if let Some(key) = env_key {
        info!("OMDb API key loaded from command line/environment");
        return Ok(key.trim().to_string());
    }

    if let Some(key) = toml_key {
        info!("OMDb API key loaded from TOML config");
        return Ok(key.trim().to_string());
    }

    Err(Error::Config(format!(
        "OMDb API key not configured. Please configure using one of:\n\
         1. Command line: --omdb-api-key your-key-here\n\
         2. Environment: {}=your-key-here\n\
         3. TOML config: omdb_api_key = \"your-key\"\n\
         \n\
         Obtain API key at: http://www.omdbapi.com/apikey.aspx",
        OMDB_API_KEY_ENV
    )))
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// OMDb client settings from TOML over compiled defaults
pub fn omdb_settings(api_key: String, toml_config: &TomlConfig, defaults: &CompiledDefaults) -> OmdbSettings {
    OmdbSettings {
        base_url: toml_config.omdb_base_url(defaults),
        api_key,
        timeout: Duration::from_secs(toml_config.request_timeout_secs(defaults)),
        min_request_interval: Duration::from_millis(toml_config.min_request_interval_ms(defaults)),
        retry: RetryPolicy::new(
            toml_config.max_retries(defaults),
            Duration::from_millis(toml_config.retry_backoff_ms(defaults)),
        ),
    }
}

pub fn build_omdb_client(
    api_key: String,
    toml_config: &TomlConfig,
    defaults: &CompiledDefaults,
) -> std::result::Result<OmdbClient, MovieSourceError> {
    OmdbClient::new(omdb_settings(api_key, toml_config, defaults))
}

pub fn build_datapackage_client(
    toml_config: &TomlConfig,
    defaults: &CompiledDefaults,
) -> std::result::Result<DataPackageClient, AwardsSourceError> {
    DataPackageClient::new(
        toml_config.datapackage_url(defaults),
        toml_config.resource_type(defaults),
        Duration::from_secs(toml_config.request_timeout_secs(defaults)),
    )
}
