//! Configuration management for the catalog API.
//!
//! Options come from command-line arguments or environment variables. A `.env`
//! file in the working directory is loaded before parsing, so local setups can
//! keep `MONGO_URI` there.
//!
//! # Environment Variables
//!
//! - `HOST` - Server bind address (default: 0.0.0.0)
//! - `PORT` - Server port (default: 5000)
//! - `MONGO_URI` - MongoDB connection string (required)
//! - `MONGO_DATABASE` - Database name (default: insertDB)
//! - `PRODUCTS_COLLECTION` - Product collection name (default: products)
//! - `CART_COLLECTION` - Cart collection name (default: cart)
//! - `CORS_ORIGINS` - Allowed CORS origins, comma-separated (default: any)

use clap::Parser;

use crate::store::StoreConfig;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default database name.
pub const DEFAULT_DATABASE: &str = "insertDB";

/// Default product collection name.
pub const DEFAULT_PRODUCTS_COLLECTION: &str = "products";

/// Default cart collection name.
pub const DEFAULT_CART_COLLECTION: &str = "cart";

// =============================================================================
// CLI Arguments
// =============================================================================

/// Catalog API - product catalog and shopping cart endpoints over MongoDB.
#[derive(Parser, Debug, Clone)]
#[command(name = "catalog-api")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PORT")]
    pub port: u16,

    // =========================================================================
    // Store Configuration
    // =========================================================================
    /// MongoDB connection string.
    #[arg(long, env = "MONGO_URI", hide_env_values = true)]
    pub mongo_uri: String,

    /// Database holding the product and cart collections.
    #[arg(long, default_value = DEFAULT_DATABASE, env = "MONGO_DATABASE")]
    pub database: String,

    /// Collection name for products.
    #[arg(long, default_value = DEFAULT_PRODUCTS_COLLECTION, env = "PRODUCTS_COLLECTION")]
    pub products_collection: String,

    /// Collection name for cart entries.
    #[arg(long, default_value = DEFAULT_CART_COLLECTION, env = "CART_COLLECTION")]
    pub cart_collection: String,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.mongo_uri.is_empty() {
            return Err(
                "MongoDB connection string is required. Set --mongo-uri or MONGO_URI".to_string(),
            );
        }
        if !self.mongo_uri.starts_with("mongodb://")
            && !self.mongo_uri.starts_with("mongodb+srv://")
        {
            return Err(
                "MongoDB connection string must start with mongodb:// or mongodb+srv://"
                    .to_string(),
            );
        }

        if self.database.is_empty() {
            return Err("database name must not be empty".to_string());
        }
        if self.products_collection.is_empty() || self.cart_collection.is_empty() {
            return Err("collection names must not be empty".to_string());
        }
        if self.products_collection == self.cart_collection {
            return Err("products and cart must use different collections".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Connection settings for the document store.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            uri: self.mongo_uri.clone(),
            database: self.database.clone(),
            products_collection: self.products_collection.clone(),
            cart_collection: self.cart_collection.clone(),
        }
    }

    /// Host part of the connection string, with any credentials stripped.
    ///
    /// Safe to log.
    pub fn redacted_mongo_host(&self) -> &str {
        let rest = self
            .mongo_uri
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.mongo_uri);
        let authority = rest.split(['/', '?']).next().unwrap_or(rest);
        authority
            .rsplit_once('@')
            .map(|(_, host)| host)
            .unwrap_or(authority)
    }
}

// =============================================================================
// Tests
// =============================================================================
