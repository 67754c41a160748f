//! Router configuration for the catalog API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health           - Health check
//! GET  /allProducts      - List all products
//! GET  /brand/{brand}    - List products of a brand
//! GET  /product/{id}     - Get one product
//! POST /addProduct       - Create a product
//! PUT  /update/{id}      - Update or upsert a product
//! GET  /cart/{email}     - List cart entries for an email
//! POST /cart             - Add a cart entry
//! ```
//!
//! # Example
//!
//! ```ignore
//! use catalog_api::server::routes::{create_router, RouterConfig};
//! use catalog_api::store::MongoStore;
//!
//! let store = MongoStore::connect(&config.store_config()).await?;
//! let router = create_router(store, RouterConfig::new());
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post, put},
    Router,
};
use http::header::{HeaderValue, CONTENT_TYPE};
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    add_cart_entry_handler, add_product_handler, all_products_handler, cart_handler,
    health_handler, product_handler, products_by_brand_handler, update_product_handler, AppState,
};
use crate::store::DocumentStore;

// =============================================================================
// Router Configuration
// =============================================================================

/// Layers wrapped around the catalog routes.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Storefront origins allowed to call the API; `None` lets any origin in
    pub cors_origins: Option<Vec<String>>,

    /// Emit a tracing span per request
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Any origin may call the API and each request is traced.
    pub fn new() -> Self {
        Self {
            cors_origins: None,
            enable_tracing: true,
        }
    }

    /// Restrict browser access to the listed storefront origins.
    ///
    /// Entries that are not valid header values are skipped. An empty list
    /// blocks every cross-origin caller.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Turn per-request spans on or off.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the application router over `store`.
pub fn create_router<S>(store: S, config: RouterConfig) -> Router
where
    S: DocumentStore + 'static,
{
    create_shared_router(Arc::new(store), config)
}

/// Create the application router over a store the caller also holds.
pub fn create_shared_router<S>(store: Arc<S>, config: RouterConfig) -> Router
where
    S: DocumentStore + 'static,
{
    let app_state = AppState::new(store);
    let cors = build_cors_layer(&config);

    let router = Router::new()
        .route("/health", get(health_handler::<S>))
        .route("/allProducts", get(all_products_handler::<S>))
        .route("/brand/{brand}", get(products_by_brand_handler::<S>))
        .route("/product/{id}", get(product_handler::<S>))
        .route("/addProduct", post(add_product_handler::<S>))
        .route("/update/{id}", put(update_product_handler::<S>))
        .route("/cart", post(add_cart_entry_handler::<S>))
        .route("/cart/{email}", get(cart_handler::<S>))
        .with_state(app_state)
        .layer(cors);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// CORS for the catalog: the read routes plus `POST`/`PUT` with JSON bodies.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60 * 24));

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => cors,
        Some(origins) => {
            let storefronts: Vec<HeaderValue> =
                origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(storefronts)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
