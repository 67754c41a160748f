//! # Catalog API
//!
//! A small HTTP service exposing product catalog and shopping cart endpoints
//! over a MongoDB database.
//!
//! Every route is a thin mapping from an HTTP request to one document-store
//! operation (find, find-one, insert-one, or update-one with upsert). Request
//! bodies are checked at the router edge and results are returned as JSON,
//! with `ObjectId`s rendered as hex strings.
//!
//! ## Architecture
//!
//! - [`store`] - `DocumentStore` trait and its MongoDB implementation
//! - [`server`] - Axum handlers, validation and router
//! - [`config`] - CLI and environment configuration
//! - [`error`] - Store and request error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use catalog_api::{create_router, DocumentStore, MongoStore, RouterConfig, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MongoStore::connect(&StoreConfig {
//!         uri: "mongodb://localhost:27017".to_string(),
//!         database: "insertDB".to_string(),
//!         products_collection: "products".to_string(),
//!         cart_collection: "cart".to_string(),
//!     })
//!     .await?;
//!     store.ping().await?;
//!
//!     let router = create_router(store, RouterConfig::new());
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//!     axum::serve(listener, router).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod server;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use error::{RequestError, StoreError};
pub use server::{
    create_router, create_shared_router, AppState, ErrorResponse, HealthResponse, ProductUpdate,
    RouterConfig,
};
pub use store::{CollectionKind, DocumentStore, InsertAck, MongoStore, StoreConfig, UpdateAck};
