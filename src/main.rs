mod cli;

use cli::Args;
use std::path::Path;
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use v_track::adapters::inbound::http::{HttpServer, Router, RouterSettings};
use v_track::adapters::outbound::memory::InMemoryProjectRepository;
use v_track::adapters::outbound::network::{OsvClient, ReqwestTransport};
use v_track::config::{self, ConfigFile, ConfigOverrides, ServerConfig};
use v_track::shared::error::ExitCode;
use v_track::shared::Result;

/// Environment variable holding a tracing filter directive
const LOG_ENV: &str = "VTRACK_LOG";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

async fn run() -> Result<()> {
    let args = Args::parse_args();

    let file = load_config_file(args.config.as_deref())?;
    let config = ServerConfig::resolve(&file, &ConfigOverrides::from_env(), &args.overrides())?;

    init_tracing(&config.log_level)?;
    config::warn_unknown_fields(&file);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        osv = %config.osv_base_url,
        cache_capacity = config.cache_capacity,
        rate_limit = %config.rate_limit,
        allow_overwrite = config.allow_overwrite,
        "starting V-Track"
    );

    // Create adapters (Dependency Injection)
    let transport = ReqwestTransport::new(config.request_timeout)?;
    let source = Arc::new(OsvClient::new(
        transport,
        &config.osv_base_url,
        config.cache_capacity,
    ));
    let repository = Arc::new(InMemoryProjectRepository::new());

    let router = Arc::new(Router::new(
        source,
        repository,
        RouterSettings {
            api_token: config.api_token.clone(),
            rate_limit: config.rate_limit,
            allow_overwrite: config.allow_overwrite,
        },
    ));

    HttpServer::bind(&config.bind_address, router)?.run().await
}

fn load_config_file(explicit: Option<&Path>) -> Result<ConfigFile> {
    let file = match explicit {
        Some(path) => Some(config::load_config_from_path(path)?),
        None => config::discover_config(Path::new("."))?,
    };
    Ok(file.unwrap_or_default())
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|error| anyhow::anyhow!("invalid log level '{}': {}", level, error))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
