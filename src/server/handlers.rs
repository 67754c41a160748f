//! HTTP request handlers for the catalog and cart API.
//!
//! Each handler maps one endpoint onto exactly one [`DocumentStore`] call and
//! returns the store's result as JSON.
//!
//! # Endpoints
//!
//! - `GET /allProducts` - All products
//! - `GET /brand/{brand}` - Products of one brand
//! - `GET /product/{id}` - One product, or `null`
//! - `POST /addProduct` - Insert a product
//! - `PUT /update/{id}` - Update (or upsert) a product's allowlisted fields
//! - `GET /cart/{email}` - Cart entries for an email
//! - `POST /cart` - Insert a cart entry
//! - `GET /health` - Health check

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mongodb::bson::{doc, Document};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use crate::error::{RequestError, StoreError};
use crate::store::{document_to_json, CollectionKind, DocumentStore, InsertAck, UpdateAck};

use super::validation::{parse_object_id, validate_cart_entry, validate_new_product, ProductUpdate};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the document store.
///
/// This is passed to all handlers via Axum's State extractor.
pub struct AppState<S: DocumentStore> {
    /// The store every route reads from and writes to
    pub store: Arc<S>,
}

impl<S: DocumentStore> AppState<S> {
    /// Create application state around a shared store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S: DocumentStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "invalid_id", "validation_error")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code, mirrored from the response line
    pub status: u16,
}

impl ErrorResponse {
    /// Create an error response carrying its status code.
    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: status.as_u16(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status ("healthy" or "degraded")
    pub status: String,

    /// Service version
    pub version: String,

    /// Store reachability ("ok" or "unreachable")
    pub store: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert RequestError to HTTP response.
///
/// - 4xx errors are logged at WARN level (client errors)
/// - 5xx errors are logged at ERROR level (server errors)
impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            RequestError::InvalidId(_) => (StatusCode::BAD_REQUEST, "invalid_id"),
            RequestError::InvalidBody(_) => (StatusCode::BAD_REQUEST, "invalid_body"),
            RequestError::Validation { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error")
            }
            RequestError::Store(StoreError::Connection(_)) => {
                (StatusCode::BAD_GATEWAY, "connection_error")
            }
            RequestError::Store(StoreError::Operation(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "store_error")
            }
            RequestError::Store(StoreError::Encoding(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "encoding_error")
            }
        };
        let message = self.to_string();

        if status.is_server_error() {
            error!(
                error_type = error_type,
                status = status.as_u16(),
                "Server error: {}",
                message
            );
        } else {
            warn!(
                error_type = error_type,
                status = status.as_u16(),
                "Client error: {}",
                message
            );
        }

        let error_response = ErrorResponse::with_status(error_type, message, status);

        (status, Json(error_response)).into_response()
    }
}

impl From<JsonRejection> for RequestError {
    fn from(rejection: JsonRejection) -> Self {
        RequestError::InvalidBody(rejection.body_text())
    }
}

fn documents_to_json(documents: Vec<Document>) -> Vec<Value> {
    documents.into_iter().map(document_to_json).collect()
}

// =============================================================================
// Product Handlers
// =============================================================================

/// Handle `GET /allProducts`.
///
/// Returns every product document, in store order.
pub async fn all_products_handler<S: DocumentStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Value>>, RequestError> {
    let products = state
        .store
        .find(CollectionKind::Products, Document::new())
        .await?;

    Ok(Json(documents_to_json(products)))
}

/// Handle `GET /brand/{brand}`.
///
/// Exact match on the `brand` field. An unknown brand yields `[]`.
pub async fn products_by_brand_handler<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(brand): Path<String>,
) -> Result<Json<Vec<Value>>, RequestError> {
    let products = state
        .store
        .find(CollectionKind::Products, doc! { "brand": brand })
        .await?;

    Ok(Json(documents_to_json(products)))
}

/// Handle `GET /product/{id}`.
///
/// # Response
///
/// - `200 OK`: the product document, or `null` when no document has this id
/// - `400 Bad Request`: `id` is not a valid identifier
pub async fn product_handler<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Option<Value>>, RequestError> {
    let id = parse_object_id(&id)?;

    let product = state
        .store
        .find_one(CollectionKind::Products, doc! { "_id": id })
        .await?;

    Ok(Json(product.map(document_to_json)))
}

/// Handle `POST /addProduct`.
///
/// The body is stored as-is (after validation) and the insert acknowledgment is
/// returned:
///
/// ```json
/// { "acknowledged": true, "insertedId": "652f1c0e9b1d8a3f4c2e7a10" }
/// ```
pub async fn add_product_handler<S: DocumentStore>(
    State(state): State<AppState<S>>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<InsertAck>, RequestError> {
    let Json(body) = body?;
    let product = validate_new_product(&body)?;

    let ack = state
        .store
        .insert_one(CollectionKind::Products, product)
        .await?;
    debug!(inserted_id = %ack.inserted_id, "Product added");

    Ok(Json(ack))
}

/// Handle `PUT /update/{id}`.
///
/// Sets the allowlisted fields present in the body on the matching product.
/// When no product has this id, one is created with exactly those fields.
///
/// # Response
///
/// - `200 OK`: update acknowledgment (`upsertedId` set when a document was created)
/// - `400 Bad Request`: invalid identifier or malformed body
/// - `422 Unprocessable Entity`: no allowlisted field to set, or a nested value
pub async fn update_product_handler<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    body: Result<Json<ProductUpdate>, JsonRejection>,
) -> Result<Json<UpdateAck>, RequestError> {
    let id = parse_object_id(&id)?;
    let Json(update) = body?;
    let fields = update.into_set_document()?;

    let ack = state
        .store
        .upsert_one(CollectionKind::Products, doc! { "_id": id }, fields)
        .await?;
    debug!(
        %id,
        matched = ack.matched_count,
        upserted = ack.upserted_count,
        "Product updated"
    );

    Ok(Json(ack))
}

// =============================================================================
// Cart Handlers
// =============================================================================

/// Handle `GET /cart/{email}`.
pub async fn cart_handler<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Value>>, RequestError> {
    let entries = state
        .store
        .find(CollectionKind::Cart, doc! { "email": email })
        .await?;

    Ok(Json(documents_to_json(entries)))
}

/// Handle `POST /cart`.
///
/// The body must carry a non-empty `email`; everything else is stored as-is.
pub async fn add_cart_entry_handler<S: DocumentStore>(
    State(state): State<AppState<S>>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<InsertAck>, RequestError> {
    let Json(body) = body?;
    let entry = validate_cart_entry(&body)?;

    let ack = state.store.insert_one(CollectionKind::Cart, entry).await?;
    debug!(inserted_id = %ack.inserted_id, "Cart entry added");

    Ok(Json(ack))
}

// =============================================================================
// Health
// =============================================================================

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` when the store answers a ping, `503 Service Unavailable` otherwise:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "store": "ok"
/// }
/// ```
pub async fn health_handler<S: DocumentStore>(
    State(state): State<AppState<S>>,
) -> (StatusCode, Json<HealthResponse>) {
    let (status, health, store) = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "healthy", "ok"),
        Err(e) => {
            warn!("Store ping failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unreachable")
        }
    };

    (
        status,
        Json(HealthResponse {
            status: health.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            store: store.to_string(),
        }),
    )
}

// =============================================================================
// Tests
// =============================================================================
