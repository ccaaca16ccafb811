//! hexquiz-server - hexapod photo gallery and quiz backend
//!
//! Resolves insect taxon names against iNaturalist, serves diversified
//! observation photos, checks quiz taxa for ancestor/descendant overlap, and
//! keeps saved quiz setups as JSON files under the root folder.

use anyhow::Result;
use clap::Parser;
use hexquiz_common::config::{ConfigSource, RootFolderInitializer, RootFolderResolver, TomlConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use hexquiz_server::inat::INaturalistClient;
use hexquiz_server::services::RandomSource;
use hexquiz_server::store::QuizStore;
use hexquiz_server::{build_router, AppState};

#[derive(Debug, Parser)]
#[command(name = "hexquiz-server", version, about = "Hexapod photo gallery and quiz backend")]
struct Args {
    /// Root folder for saved quizzes
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// HTTP port (overrides HEXQUIZ_PORT and the config file)
    #[arg(long)]
    port: Option<u16>,

    /// Path to config.toml
    #[arg(long, env = "HEXQUIZ_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let (config, config_source) = TomlConfig::load_or_default(args.config.as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();

    // Build identification first, before any network or disk work
    info!(
        "Starting hexquiz-server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match &config_source {
        ConfigSource::File(path) => info!("Config: {}", path.display()),
        ConfigSource::Defaults { reason } => warn!("{} - using built-in defaults", reason),
    }

    let root_folder = RootFolderResolver::new(args.root_folder, &config).resolve();
    let initializer = RootFolderInitializer::new(root_folder);
    initializer.ensure_directory_exists()?;
    info!("Root folder: {}", initializer.root_folder().display());

    let client = INaturalistClient::new(&config.inaturalist)?;
    info!(
        "iNaturalist API: {} (timeout {}s)",
        client.base_url(),
        config.inaturalist.timeout_secs
    );

    let store = QuizStore::new(initializer.quiz_dir());
    let state = AppState::new(Arc::new(client), Arc::new(RandomSource::from_entropy()), store);
    let app = build_router(state);

    let port = config.resolve_port(args.port);
    let address = format!("{}:{}", config.bind_address, port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("hexquiz-server listening on http://{}", address);
    info!("Health check: http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
