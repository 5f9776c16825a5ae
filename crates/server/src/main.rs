use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cloudsaver_core::{
    load_config, validate_config, Acquirer, CandidateMatcher, CloudSaverClient, HistoryStore,
    IdentityResolver, InMemoryIdCache, MediaFilter, MetadataLookup, OfflineLookup, ResultSource,
    SqliteHistoryStore, TmdbLookup,
};
use cloudsaver_server::{api::create_router, state::AppState};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("CLOUDSAVER_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    let config_json = serde_json::to_string(&config).unwrap_or_default();
    let config_hash = format!("{:x}", Sha256::digest(config_json.as_bytes()));
    info!(
        version = VERSION,
        config_hash = &config_hash[..16],
        "Configuration loaded successfully"
    );
    info!("Database path: {:?}", config.database.path);

    // Create SQLite history store
    let history: Arc<dyn HistoryStore> = Arc::new(
        SqliteHistoryStore::new(&config.database.path)
            .context("Failed to create history store")?,
    );
    info!("History store initialized");

    // Metadata lookup, with a shared id cache the resolver reads from
    let id_cache = Arc::new(InMemoryIdCache::new());
    let lookup: Arc<dyn MetadataLookup> = match &config.tmdb {
        Some(tmdb_config) => {
            info!("Initializing TMDB lookup ({})", tmdb_config.language);
            Arc::new(
                TmdbLookup::new(tmdb_config.clone())
                    .context("Failed to create TMDB lookup")?
                    .with_cache(Arc::clone(&id_cache)),
            )
        }
        None => {
            warn!("No TMDB configured, identities will stay unresolved");
            Arc::new(OfflineLookup)
        }
    };

    let resolver = IdentityResolver::new(lookup).with_cache(id_cache);
    let matcher = CandidateMatcher::new(Arc::new(resolver));
    let filter = Arc::new(MediaFilter::new(matcher, config.filter.clone()));
    info!(
        "Filter enabled for cloud types: {:?}",
        config.filter.enabled_cloud_types
    );

    let mut state = AppState::new(config.clone(), Arc::clone(&filter), Arc::clone(&history));

    // Create search source if configured
    match &config.cloudsaver {
        Some(cloudsaver_config) => {
            info!("Initializing CloudSaver client at {}", cloudsaver_config.base_url);
            let source: Arc<dyn ResultSource> = Arc::new(
                CloudSaverClient::new(cloudsaver_config.clone())
                    .context("Failed to create CloudSaver client")?,
            );
            let acquirer = Acquirer::new(Arc::clone(&source), filter, history);
            state = state
                .with_source(source)
                .with_acquirer(Arc::new(acquirer));
        }
        None => info!("No CloudSaver configured, search and acquisition disabled"),
    }

    // Create router
    let app = create_router(Arc::new(state));

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
