//! Document store abstraction.
//!
//! The router never talks to the MongoDB driver directly. It goes through the
//! [`DocumentStore`] trait, which exposes exactly the operations the HTTP
//! routes translate into:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              Request Router             │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │          DocumentStore Trait            │
//! │  find / find_one / insert / upsert      │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │              MongoStore                 │
//! │   (products + cart collection handles)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! The store is constructed by the process bootstrap and handed to the router,
//! so tests can swap in an in-memory implementation.

mod convert;
mod mongo;

use async_trait::async_trait;
use mongodb::bson::{Bson, Document};
use serde::Serialize;
use serde_json::Value;

use crate::error::StoreError;

pub use convert::{bson_to_json, document_to_json, json_to_bson, json_to_document};
pub use mongo::{MongoStore, StoreConfig};

// =============================================================================
// Collections
// =============================================================================

/// The logical collections the service reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// Product catalog
    Products,
    /// Shopping cart entries
    Cart,
}

impl CollectionKind {
    /// Short name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Products => "products",
            CollectionKind::Cart => "cart",
        }
    }
}

// =============================================================================
// Acknowledgments
// =============================================================================

/// Acknowledgment returned for a single-document insert.
///
/// Serializes as `{"acknowledged": true, "insertedId": "<hex>"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: Value,
}

impl InsertAck {
    pub fn new(inserted_id: Bson) -> Self {
        Self {
            acknowledged: true,
            inserted_id: bson_to_json(inserted_id),
        }
    }
}

/// Acknowledgment returned for an update with upsert.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    /// Identifier of the inserted document, `null` when an existing one matched
    pub upserted_id: Option<Value>,
}

impl UpdateAck {
    pub fn new(matched_count: u64, modified_count: u64, upserted_id: Option<Bson>) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_count: u64::from(upserted_id.is_some()),
            upserted_id: upserted_id.map(bson_to_json),
        }
    }
}

// =============================================================================
// DocumentStore Trait
// =============================================================================

/// Operations the router can perform against the document store.
///
/// Filters are exact-match documents (`{field: value}`); no query operators are
/// built by the router.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return every document in `collection` matching `filter`.
    async fn find(
        &self,
        collection: CollectionKind,
        filter: Document,
    ) -> Result<Vec<Document>, StoreError>;

    /// Return the first document matching `filter`, if any.
    async fn find_one(
        &self,
        collection: CollectionKind,
        filter: Document,
    ) -> Result<Option<Document>, StoreError>;

    /// Insert a document. The store mints its `_id`.
    async fn insert_one(
        &self,
        collection: CollectionKind,
        document: Document,
    ) -> Result<InsertAck, StoreError>;

    /// `$set` the given fields on the document matching `filter`, inserting a
    /// new document (filter fields plus `fields`) when none matches.
    async fn upsert_one(
        &self,
        collection: CollectionKind,
        filter: Document,
        fields: Document,
    ) -> Result<UpdateAck, StoreError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
