//! Request body validation.
//!
//! Every body is checked here before it reaches the store. The checks are
//! intentionally shallow: documents stay schema-less, but obviously broken
//! input (store-minted `_id` supplied by the client, an update with nothing to
//! set, a cart entry without its lookup key) is rejected with a 4xx instead of
//! being passed through.

use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::RequestError;
use crate::store::json_to_document;

/// Product fields an update may set, in storage order.
pub const PRODUCT_UPDATE_FIELDS: [&str; 7] = [
    "image",
    "name",
    "brand",
    "type",
    "price",
    "description",
    "rating",
];

/// Field used to look cart entries up.
pub const CART_EMAIL_FIELD: &str = "email";

/// Parse a path identifier into an [`ObjectId`].
pub fn parse_object_id(id: &str) -> Result<ObjectId, RequestError> {
    ObjectId::parse_str(id).map_err(|_| {
        RequestError::InvalidId(format!("'{}' is not a 24-character hex identifier", id))
    })
}

/// Body of `PUT /update/{id}`.
///
/// Only the allowlisted product fields are read; anything else in the body is
/// ignored. `None` means the field was absent; an explicit `null` is kept as
/// `Some(Value::Null)` and clears the stored value.
#[derive(Debug, Default, Deserialize)]
pub struct ProductUpdate {
    #[serde(default, deserialize_with = "present")]
    pub image: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub brand: Option<Value>,
    #[serde(default, rename = "type", deserialize_with = "present")]
    pub kind: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub price: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub rating: Option<Value>,
}

// Only called for keys that appear in the body, so `null` maps to `Some(Null)`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl ProductUpdate {
    /// Build the `$set` document, rejecting empty updates and nested values.
    pub fn into_set_document(self) -> Result<Document, RequestError> {
        let values = [
            self.image,
            self.name,
            self.brand,
            self.kind,
            self.price,
            self.description,
            self.rating,
        ];

        let mut fields = Map::new();
        for (field, value) in PRODUCT_UPDATE_FIELDS.into_iter().zip(values) {
            let Some(value) = value else { continue };
            if value.is_object() || value.is_array() {
                return Err(RequestError::validation(
                    field,
                    "must be a string, number or boolean",
                ));
            }
            fields.insert(field.to_string(), value);
        }

        if fields.values().all(Value::is_null) {
            return Err(RequestError::validation(
                "body",
                format!(
                    "update must set a non-null value for at least one of: {}",
                    PRODUCT_UPDATE_FIELDS.join(", ")
                ),
            ));
        }

        Ok(json_to_document(&fields))
    }
}

/// Validate the body of `POST /addProduct`.
pub fn validate_new_product(body: &Map<String, Value>) -> Result<Document, RequestError> {
    if body.is_empty() {
        return Err(RequestError::validation("body", "product must not be empty"));
    }
    reject_client_id(body)?;
    Ok(json_to_document(body))
}

/// Validate the body of `POST /cart`.
pub fn validate_cart_entry(body: &Map<String, Value>) -> Result<Document, RequestError> {
    match body.get(CART_EMAIL_FIELD) {
        Some(Value::String(email)) if !email.trim().is_empty() => {}
        _ => {
            return Err(RequestError::validation(
                CART_EMAIL_FIELD,
                "must be a non-empty string",
            ))
        }
    }
    reject_client_id(body)?;
    Ok(json_to_document(body))
}

fn reject_client_id(body: &Map<String, Value>) -> Result<(), RequestError> {
    if body.contains_key("_id") {
        return Err(RequestError::validation(
            "_id",
            "identifiers are assigned by the store",
        ));
    }
    Ok(())
}
