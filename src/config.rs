//! Configuration for the V-Track server.
//!
//! Settings are layered: built-in defaults, then the YAML file
//! (`v-track.config.yml` or an explicit path), then `VTRACK_*` environment
//! variables, then command-line flags.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::adapters::inbound::http::RateLimit;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "v-track.config.yml";

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8000";
pub const DEFAULT_OSV_BASE_URL: &str = "https://api.osv.dev/v1/";
pub const DEFAULT_CACHE_CAPACITY: usize = 128;
pub const DEFAULT_RATE_LIMIT: &str = "60/minute";
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const ENV_API_TOKEN: &str = "VTRACK_API_TOKEN";
pub const ENV_BIND: &str = "VTRACK_BIND";
pub const ENV_OSV_URL: &str = "VTRACK_OSV_URL";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub bind_address: Option<String>,
    pub api_token: Option<String>,
    pub osv_base_url: Option<String>,
    pub cache_capacity: Option<usize>,
    pub rate_limit: Option<String>,
    pub allow_overwrite: Option<bool>,
    pub log_level: Option<String>,
    pub request_timeout_secs: Option<u64>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Values supplied from the environment or the command line.
///
/// `None` (or `false` for flags) leaves the lower layer in effect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub bind_address: Option<String>,
    pub api_token: Option<String>,
    pub osv_base_url: Option<String>,
    pub cache_capacity: Option<usize>,
    pub rate_limit: Option<String>,
    pub allow_overwrite: bool,
    pub log_level: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl ConfigOverrides {
    /// Reads the `VTRACK_*` variables from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through `lookup`; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            bind_address: read(ENV_BIND),
            api_token: read(ENV_API_TOKEN),
            osv_base_url: read(ENV_OSV_URL),
            ..Self::default()
        }
    }
}

/// Fully resolved and validated server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_address: String,
    pub api_token: String,
    pub osv_base_url: String,
    pub cache_capacity: usize,
    pub rate_limit: RateLimit,
    pub allow_overwrite: bool,
    pub log_level: String,
    pub request_timeout: Option<Duration>,
}

impl ServerConfig {
    /// Merges the layers (later ones win) and validates the result
    pub fn resolve(
        file: &ConfigFile,
        env: &ConfigOverrides,
        cli: &ConfigOverrides,
    ) -> Result<Self> {
        fn pick<T: Clone>(cli: &Option<T>, env: &Option<T>, file: &Option<T>) -> Option<T> {
            cli.clone().or_else(|| env.clone()).or_else(|| file.clone())
        }

        let api_token = pick(&cli.api_token, &env.api_token, &file.api_token)
            .map(|token| token.trim().to_string())
            .unwrap_or_default();
        if api_token.is_empty() {
            bail!(
                "Missing API token.\n\n💡 Hint: Set {} or add 'api_token' to {}.",
                ENV_API_TOKEN,
                CONFIG_FILENAME
            );
        }

        let cache_capacity = pick(&cli.cache_capacity, &env.cache_capacity, &file.cache_capacity)
            .unwrap_or(DEFAULT_CACHE_CAPACITY);
        if cache_capacity == 0 {
            bail!("Invalid config: cache_capacity must be at least 1.");
        }

        let rate_limit_text = pick(&cli.rate_limit, &env.rate_limit, &file.rate_limit)
            .unwrap_or_else(|| DEFAULT_RATE_LIMIT.to_string());
        let rate_limit: RateLimit = rate_limit_text.parse().with_context(|| {
            format!(
                "Invalid config: rate_limit '{}'.\n\n💡 Hint: Use a value like \"60/minute\".",
                rate_limit_text
            )
        })?;

        let mut osv_base_url = pick(&cli.osv_base_url, &env.osv_base_url, &file.osv_base_url)
            .unwrap_or_else(|| DEFAULT_OSV_BASE_URL.to_string());
        if !osv_base_url.ends_with('/') {
            osv_base_url.push('/');
        }

        let request_timeout = pick(
            &cli.request_timeout_secs,
            &env.request_timeout_secs,
            &file.request_timeout_secs,
        )
        .map(Duration::from_secs);

        Ok(Self {
            bind_address: pick(&cli.bind_address, &env.bind_address, &file.bind_address)
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            api_token,
            osv_base_url,
            cache_capacity,
            rate_limit,
            allow_overwrite: cli.allow_overwrite
                || env.allow_overwrite
                || file.allow_overwrite.unwrap_or(false),
            log_level: pick(&cli.log_level, &env.log_level, &file.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            request_timeout,
        })
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    // An empty file is a valid, empty configuration
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Warn about unknown fields in the config file.
///
/// Called once logging is up, since the file also decides the log level.
pub fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        tracing::warn!(field = %key, "unknown config field will be ignored");
    }
}
