//! Catalog API - product catalog and shopping cart endpoints over MongoDB.
//!
//! This binary loads configuration, connects to the store, and serves the router.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_api::{
    config::Config,
    server::{create_router, RouterConfig},
    store::{DocumentStore, MongoStore},
};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is normal outside local development
    let dotenv = dotenvy::dotenv();

    let config = Config::parse();
    init_logging(config.verbose);

    if let Err(e) = &dotenv {
        if !e.not_found() {
            warn!("Ignoring unreadable .env file: {}", e);
        }
    }

    run(config).await
}

async fn run(config: Config) -> ExitCode {
    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Catalog API v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  MongoDB host: {}", config.redacted_mongo_host());
    info!("  Database: {}", config.database);
    info!(
        "  Collections: {} (products), {} (cart)",
        config.products_collection, config.cart_collection
    );
    match &config.cors_origins {
        Some(origins) => info!("  CORS origins: {}", origins.join(", ")),
        None => info!("  CORS origins: any"),
    }

    // Connect and ping the deployment
    info!("Connecting to MongoDB...");
    let store = match MongoStore::connect(&config.store_config()).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to create MongoDB client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = store.ping().await {
        error!("Failed to reach MongoDB: {}", e);
        error!("Please check:");
        error!("  - MONGO_URI points at a reachable deployment");
        error!("  - The credentials in MONGO_URI are valid");
        error!("  - Your IP is allowed by the deployment's network rules");
        return ExitCode::FAILURE;
    }
    info!("Pinged your deployment. Successfully connected to MongoDB");

    let router = create_router(store.clone(), build_router_config(&config));

    let addr = config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };
    info!("Server listening on http://{}", addr);

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    info!("Closing MongoDB connections");
    store.shutdown().await;

    match served {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Resolve when the process receives Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "catalog_api=debug,tower_http=debug"
    } else {
        "catalog_api=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application Config.
fn build_router_config(config: &Config) -> RouterConfig {
    let mut router_config = RouterConfig::new().with_tracing(!config.no_tracing);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config
}
