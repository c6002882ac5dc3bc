use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use folio_server::{
    create_app,
    infra::{
        app_state::AppState,
        config::{Config, ConfigLoad, ConfigLoader, ConfigWarnings},
        listener::bind_listener,
        shutdown::shutdown_signal,
    },
    portfolio::load_fixtures,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "folio-server")]
#[command(about = "Portfolio site server with a cached platform metadata proxy")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Path to a folio.toml configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to a .env file (defaults to ./.env when present)
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Listen port (overrides PORT and the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Listen host (overrides HOST and the config file)
    #[arg(long)]
    host: Option<String>,

    /// Directory of static assets (overrides FOLIO_STATIC_DIR)
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load and validate configuration and fixtures, print the result and exit
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = load_runtime_config(&cli.serve)?;

    if let Some(Command::CheckConfig) = cli.command {
        let fixtures = load_fixtures(config.portfolio.fixtures_path.as_deref())
            .context("failed to load portfolio fixtures")?;
        info!(
            games = fixtures.games.len(),
            communities = fixtures.communities.len(),
            "fixtures ok"
        );
        println!("{config:#?}");
        return Ok(());
    }

    run_server(config).await
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // Override via RUST_LOG.
                "info,folio_server=debug,tower_http=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<Config> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = &args.env_file {
        loader = loader.with_env_file(path);
    }

    let ConfigLoad {
        mut config,
        warnings,
    } = loader.load().context("failed to load configuration")?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }
    if let Some(dir) = args.static_dir.clone() {
        config.server.static_dir = dir;
    }

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = &config.metadata.config_path {
        info!(path = %path.display(), "loaded configuration file");
    }
    log_warnings(&warnings);

    Ok(config)
}

fn log_warnings(warnings: &ConfigWarnings) {
    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => warn!(message = %warning.message, "configuration warning"),
        }
    }
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    let fixtures = load_fixtures(config.portfolio.fixtures_path.as_deref())
        .context("failed to load portfolio fixtures")?;

    let config = Arc::new(config);
    let state = AppState::with_http(Arc::clone(&config), fixtures)
        .context("failed to build upstream HTTP client")?;

    info!(
        ttl_ms = config.upstream.cache_ttl.as_millis() as u64,
        timeout_ms = config.upstream.timeout.as_millis() as u64,
        authenticated = config.upstream.api_key.is_some(),
        "upstream proxy configured"
    );

    let app = create_app(state);

    let listener = bind_listener(&config.server).await.with_context(|| {
        format!(
            "failed to bind {}:{}",
            config.server.host, config.server.port
        )
    })?;
    info!("API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}
