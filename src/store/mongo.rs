//! MongoDB-backed document store.
//!
//! Holds one driver [`Client`] and the two collection handles derived from it.
//! The driver pools connections internally, so a single `MongoStore` is shared
//! by every request.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::error::ErrorKind;
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection};
use tracing::debug;

use crate::error::StoreError;

use super::{CollectionKind, DocumentStore, InsertAck, UpdateAck};

/// Connection settings for [`MongoStore`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// MongoDB connection string (`mongodb://` or `mongodb+srv://`)
    pub uri: String,

    /// Database holding both collections
    pub database: String,

    /// Collection name for products
    pub products_collection: String,

    /// Collection name for cart entries
    pub cart_collection: String,
}

/// MongoDB implementation of [`DocumentStore`].
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    database: String,
    products: Collection<Document>,
    cart: Collection<Document>,
}

impl MongoStore {
    /// Create a client for `config.uri` and bind the configured collections.
    ///
    /// The Stable API (v1, strict, with deprecation errors) is requested. The
    /// driver connects lazily; call [`DocumentStore::ping`] to verify the
    /// deployment is reachable.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(config.uri.as_str())
            .await
            .map_err(map_mongo_error)?;

        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );

        let client = Client::with_options(options).map_err(map_mongo_error)?;
        Ok(Self::from_client(client, config))
    }

    /// Wrap an existing client.
    pub fn from_client(client: Client, config: &StoreConfig) -> Self {
        let database = client.database(&config.database);
        Self {
            products: database.collection(&config.products_collection),
            cart: database.collection(&config.cart_collection),
            database: config.database.clone(),
            client,
        }
    }

    /// Name of the bound database.
    pub fn database_name(&self) -> &str {
        &self.database
    }

    /// Name of the collection behind `kind`.
    pub fn collection_name(&self, kind: CollectionKind) -> &str {
        self.collection(kind).name()
    }

    /// Close the client's connections and stop its background workers.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }

    fn collection(&self, kind: CollectionKind) -> &Collection<Document> {
        match kind {
            CollectionKind::Products => &self.products,
            CollectionKind::Cart => &self.cart,
        }
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(
        &self,
        collection: CollectionKind,
        filter: Document,
    ) -> Result<Vec<Document>, StoreError> {
        debug!(collection = collection.as_str(), ?filter, "find");
        let cursor = self
            .collection(collection)
            .find(filter)
            .await
            .map_err(map_mongo_error)?;
        cursor.try_collect().await.map_err(map_mongo_error)
    }

    async fn find_one(
        &self,
        collection: CollectionKind,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        debug!(collection = collection.as_str(), ?filter, "find_one");
        self.collection(collection)
            .find_one(filter)
            .await
            .map_err(map_mongo_error)
    }

    async fn insert_one(
        &self,
        collection: CollectionKind,
        document: Document,
    ) -> Result<InsertAck, StoreError> {
        debug!(collection = collection.as_str(), "insert_one");
        let result = self
            .collection(collection)
            .insert_one(document)
            .await
            .map_err(map_mongo_error)?;
        Ok(InsertAck::new(result.inserted_id))
    }

    async fn upsert_one(
        &self,
        collection: CollectionKind,
        filter: Document,
        fields: Document,
    ) -> Result<UpdateAck, StoreError> {
        debug!(collection = collection.as_str(), ?filter, "upsert_one");
        let result = self
            .collection(collection)
            .update_one(filter, doc! { "$set": fields })
            .upsert(true)
            .await
            .map_err(map_mongo_error)?;
        Ok(UpdateAck::new(
            result.matched_count,
            result.modified_count,
            result.upserted_id,
        ))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(map_mongo_error)?;
        Ok(())
    }
}

/// Classify a driver error.
fn map_mongo_error(err: mongodb::error::Error) -> StoreError {
    match err.kind.as_ref() {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::Authentication { .. }
        | ErrorKind::DnsResolve { .. } => StoreError::Connection(err.to_string()),
        ErrorKind::BsonSerialization(_) | ErrorKind::BsonDeserialization(_) => {
            StoreError::Encoding(err.to_string())
        }
        _ => StoreError::Operation(err.to_string()),
    }
}
