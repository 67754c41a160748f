//! Conversion between JSON request/response bodies and BSON documents.
//!
//! `ObjectId` values are rendered as plain hex strings on the way out, so a
//! client can paste an `_id` straight back into `/product/{id}`.

use mongodb::bson::{Bson, Document};
use serde_json::{Map, Value};

/// Convert a JSON object into a BSON document.
///
/// Integers become `Int64`, other numbers `Double`. Keys are copied verbatim,
/// so extended JSON shapes such as `{"$oid": ...}` stay plain sub-documents.
pub fn json_to_document(object: &Map<String, Value>) -> Document {
    object
        .iter()
        .map(|(key, value)| (key.clone(), json_to_bson(value)))
        .collect()
}

/// Convert a single JSON value into BSON.
pub fn json_to_bson(value: &Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Bson::Int64(i),
            None => Bson::Double(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => Bson::String(s.clone()),
        Value::Array(items) => Bson::Array(items.iter().map(json_to_bson).collect()),
        Value::Object(object) => Bson::Document(json_to_document(object)),
    }
}

/// Convert a BSON document into a JSON object.
pub fn document_to_json(document: Document) -> Value {
    Value::Object(
        document
            .into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

/// Convert a single BSON value into JSON.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(document) => document_to_json(document),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}
