use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Use the library instead of redeclaring modules
use explore_catalog::{
    cache::{CacheStore, MemoryCache, RedisCache},
    catalog_store::MongoCatalogStore,
    config::Config,
    object_storage::S3ObjectStorage,
    services::CatalogService,
    web::WebServer,
};

#[derive(Parser)]
#[command(name = "explore-catalog")]
#[command(version = "0.1.0")]
#[command(about = "Public content catalog service with cache-aside reads and presigned media delivery")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with specified level
    let log_filter = format!("explore_catalog={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Explore Catalog Service v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Load configuration from specified file
    std::env::set_var("CONFIG_FILE", &cli.config);
    let mut config = Config::load()?;
    info!("Configuration loaded from: {}", cli.config);

    // Override config with CLI arguments
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }

    // Cache backend: Redis when configured, in-process otherwise. Per-request
    // cache failures degrade to the backing stores either way.
    let cache: Arc<dyn CacheStore> = match &config.cache.url {
        Some(url) => {
            let redis_cache = RedisCache::connect(url).await?;
            info!("Cache backend connected: redis");
            Arc::new(redis_cache)
        }
        None => {
            warn!("No cache.url configured; using in-process memory cache");
            Arc::new(MemoryCache::new())
        }
    };

    let store = MongoCatalogStore::connect(&config.catalog_store).await?;
    info!(
        "Catalog store connection established: {}/{}",
        config.catalog_store.database, config.catalog_store.collection
    );

    let storage = S3ObjectStorage::from_env(&config.object_storage).await;
    info!("Object storage client initialized: {}", config.object_storage.bucket);

    let catalog = CatalogService::new(
        Arc::new(store),
        Arc::new(storage),
        cache.clone(),
        &config,
    )?;

    let web_server = WebServer::new(config, catalog, cache).await?;

    info!(
        "Starting web server on {}:{}",
        web_server.host(),
        web_server.port()
    );
    web_server.serve().await?;

    Ok(())
}
