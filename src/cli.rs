use clap::Parser;
use std::path::PathBuf;
use v_track::config::ConfigOverrides;

/// Track dependency vulnerabilities of projects against the OSV database
///
/// The API token is read from VTRACK_API_TOKEN or the config file, never
/// from the command line.
#[derive(Parser, Debug)]
#[command(name = "v-track")]
#[command(version)]
#[command(about = "Track dependency vulnerabilities of projects against the OSV database", long_about = None)]
pub struct Args {
    /// Address to listen on [default: 127.0.0.1:8000]
    #[arg(short, long, value_name = "HOST:PORT")]
    pub bind: Option<String>,

    /// Path to a YAML config file (defaults to ./v-track.config.yml if present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base URL of the OSV API [default: https://api.osv.dev/v1/]
    #[arg(long, value_name = "URL")]
    pub osv_url: Option<String>,

    /// Maximum number of cached vulnerability source responses [default: 128]
    #[arg(long, value_name = "N")]
    pub cache_capacity: Option<usize>,

    /// Per-client request budget, e.g. "60/minute" (second, minute, hour, day)
    #[arg(long, value_name = "LIMIT")]
    pub rate_limit: Option<String>,

    /// Re-creating an existing project replaces it instead of returning it unchanged
    #[arg(long)]
    pub allow_overwrite: bool,

    /// Log level used when VTRACK_LOG is not set [default: info]
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Timeout for calls to the vulnerability source, in seconds (no timeout by default)
    #[arg(long, value_name = "SECS")]
    pub request_timeout: Option<u64>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            bind_address: self.bind.clone(),
            api_token: None,
            osv_base_url: self.osv_url.clone(),
            cache_capacity: self.cache_capacity,
            rate_limit: self.rate_limit.clone(),
            allow_overwrite: self.allow_overwrite,
            log_level: self.log_level.clone(),
            request_timeout_secs: self.request_timeout,
        }
    }
}
