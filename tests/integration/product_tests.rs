//! Product endpoint integration tests.
//!
//! Tests verify:
//! - Listing and brand filtering
//! - Lookup by identifier (found, absent, malformed)
//! - Insert acknowledgments and round-trips through `/product/{id}`
//! - Update-with-upsert semantics on the allowlisted fields

use axum::http::StatusCode;
use mongodb::bson::oid::ObjectId;
use serde_json::{json, Value};

use catalog_api::store::CollectionKind;

use super::test_utils::{add_product, get, post, put, test_router, MemoryStore};

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_all_products_empty() {
    let router = test_router(MemoryStore::new());

    let (status, body) = get(&router, "/allProducts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_all_products_returns_every_document() {
    let router = test_router(MemoryStore::new());
    add_product(&router, json!({"name": "Widget", "brand": "Acme"})).await;
    add_product(&router, json!({"name": "Gadget", "brand": "Globex"})).await;

    let (status, body) = get(&router, "/allProducts").await;
    assert_eq!(status, StatusCode::OK);

    let mut names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Gadget", "Widget"]);
}

#[tokio::test]
async fn test_brand_filter_excludes_other_brands() {
    let router = test_router(MemoryStore::new());
    add_product(&router, json!({"name": "Widget", "brand": "Acme"})).await;
    add_product(&router, json!({"name": "Anvil", "brand": "Acme"})).await;
    add_product(&router, json!({"name": "Gadget", "brand": "Globex"})).await;
    add_product(&router, json!({"name": "Unbranded"})).await;

    let (status, body) = get(&router, "/brand/Acme").await;
    assert_eq!(status, StatusCode::OK);

    let products = body.as_array().unwrap();
    assert_eq!(products.len(), 2);
    assert!(products.iter().all(|p| p["brand"] == "Acme"));
}

#[tokio::test]
async fn test_brand_filter_is_exact_match() {
    let router = test_router(MemoryStore::new());
    add_product(&router, json!({"name": "Widget", "brand": "Acme"})).await;

    let (_, body) = get(&router, "/brand/acme").await;
    assert_eq!(body, json!([]));

    let (_, body) = get(&router, "/brand/Acm").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_brand_path_is_percent_decoded() {
    let router = test_router(MemoryStore::new());
    add_product(&router, json!({"name": "Rocket", "brand": "Big Co"})).await;

    let (status, body) = get(&router, "/brand/Big%20Co").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

// =============================================================================
// Lookup by Identifier
// =============================================================================

#[tokio::test]
async fn test_add_then_get_product() {
    let router = test_router(MemoryStore::new());

    let (status, ack) = post(
        &router,
        "/addProduct",
        json!({"name": "Widget", "brand": "Acme", "price": 9.99}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["acknowledged"], true);
    let id = ack["insertedId"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 24);

    let (status, product) = get(&router, &format!("/product/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        product,
        json!({"_id": id, "name": "Widget", "brand": "Acme", "price": 9.99})
    );
}

#[tokio::test]
async fn test_get_product_keeps_every_inserted_field() {
    let router = test_router(MemoryStore::new());
    let body = json!({
        "image": "https://cdn.example.com/widget.png",
        "name": "Widget",
        "brand": "Acme",
        "type": "tool",
        "price": 9.99,
        "description": "A widget",
        "rating": 4,
        "tags": ["new", "sale"],
        "dimensions": {"w": 3, "h": 4},
    });
    let id = add_product(&router, body.clone()).await;

    let (_, product) = get(&router, &format!("/product/{}", id)).await;
    for (key, value) in body.as_object().unwrap() {
        assert_eq!(&product[key], value, "field {} should round-trip", key);
    }
}

#[tokio::test]
async fn test_get_product_keeps_extended_json_shapes() {
    let router = test_router(MemoryStore::new());
    let body = json!({
        "name": "Widget",
        "ref": {"$oid": "652f1c0e9b1d8a3f4c2e7a10"},
        "released": {"$date": "2024-01-01T00:00:00Z"},
    });
    let id = add_product(&router, body.clone()).await;

    let (_, product) = get(&router, &format!("/product/{}", id)).await;
    assert_eq!(product["ref"], body["ref"]);
    assert_eq!(product["released"], body["released"]);
}

#[tokio::test]
async fn test_get_missing_product_returns_null() {
    let router = test_router(MemoryStore::new());

    let (status, body) = get(&router, &format!("/product/{}", ObjectId::new())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_get_product_invalid_id() {
    let router = test_router(MemoryStore::new());

    let (status, body) = get(&router, "/product/12345").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_id");
    assert_eq!(body["status"], 400);
}

// =============================================================================
// Create Validation
// =============================================================================

#[tokio::test]
async fn test_add_product_rejects_client_id() {
    let store = MemoryStore::new();
    let router = test_router(store.clone());

    let (status, body) = post(
        &router,
        "/addProduct",
        json!({"_id": "abc", "name": "Widget"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
    assert!(store.documents(CollectionKind::Products).await.is_empty());
}

#[tokio::test]
async fn test_add_product_rejects_empty_object() {
    let router = test_router(MemoryStore::new());

    let (status, body) = post(&router, "/addProduct", json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_add_product_rejects_non_object_body() {
    let router = test_router(MemoryStore::new());

    let (status, body) = post(&router, "/addProduct", json!(["Widget"])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_body");
}

// =============================================================================
// Update with Upsert
// =============================================================================

#[tokio::test]
async fn test_update_missing_id_upserts_allowlisted_fields() {
    let router = test_router(MemoryStore::new());
    let id = ObjectId::new().to_hex();

    let (status, ack) = put(
        &router,
        &format!("/update/{}", id),
        json!({"name": "Widget", "brand": "Acme", "price": 5, "stock": 12}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["acknowledged"], true);
    assert_eq!(ack["matchedCount"], 0);
    assert_eq!(ack["upsertedCount"], 1);
    assert_eq!(ack["upsertedId"], id.as_str());

    let (_, product) = get(&router, &format!("/product/{}", id)).await;
    assert_eq!(
        product,
        json!({"_id": id, "name": "Widget", "brand": "Acme", "price": 5})
    );
}

#[tokio::test]
async fn test_update_existing_replaces_only_allowlisted_fields() {
    let router = test_router(MemoryStore::new());
    let id = add_product(
        &router,
        json!({"name": "Widget", "brand": "Acme", "price": 9.99, "stock": 40, "sku": "W-1"}),
    )
    .await;

    let (status, ack) = put(
        &router,
        &format!("/update/{}", id),
        json!({"name": "Widget Pro", "price": 14.5, "stock": 0, "sku": "changed"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["matchedCount"], 1);
    assert_eq!(ack["modifiedCount"], 1);
    assert_eq!(ack["upsertedCount"], 0);
    assert!(ack["upsertedId"].is_null());

    let (_, product) = get(&router, &format!("/product/{}", id)).await;
    assert_eq!(product["_id"], id.as_str());
    assert_eq!(product["name"], "Widget Pro");
    assert_eq!(product["price"], 14.5);
    assert_eq!(product["brand"], "Acme");
    assert_eq!(product["stock"], 40);
    assert_eq!(product["sku"], "W-1");
}

#[tokio::test]
async fn test_update_with_identical_values_is_not_modified() {
    let router = test_router(MemoryStore::new());
    let id = add_product(&router, json!({"name": "Widget"})).await;

    let (_, ack) = put(&router, &format!("/update/{}", id), json!({"name": "Widget"})).await;
    assert_eq!(ack["matchedCount"], 1);
    assert_eq!(ack["modifiedCount"], 0);
}

#[tokio::test]
async fn test_update_explicit_null_clears_field() {
    let router = test_router(MemoryStore::new());
    let id = add_product(&router, json!({"name": "Widget", "description": "old"})).await;

    let (status, ack) = put(
        &router,
        &format!("/update/{}", id),
        json!({"name": "Widget 2", "description": null}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["modifiedCount"], 1);

    let (_, product) = get(&router, &format!("/product/{}", id)).await;
    assert_eq!(product["name"], "Widget 2");
    assert!(product.get("description").unwrap().is_null());
}

#[tokio::test]
async fn test_update_with_only_nulls_is_rejected() {
    let router = test_router(MemoryStore::new());
    let id = add_product(&router, json!({"name": "Widget"})).await;

    let (status, body) = put(
        &router,
        &format!("/update/{}", id),
        json!({"name": null, "description": null}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_update_requires_allowlisted_field() {
    let store = MemoryStore::new();
    let router = test_router(store.clone());
    let id = ObjectId::new().to_hex();

    let (status, body) = put(&router, &format!("/update/{}", id), json!({"stock": 3})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
    assert!(store.documents(CollectionKind::Products).await.is_empty());
}

#[tokio::test]
async fn test_update_rejects_nested_value() {
    let router = test_router(MemoryStore::new());
    let id = ObjectId::new().to_hex();

    let (status, body) = put(
        &router,
        &format!("/update/{}", id),
        json!({"price": {"$inc": 1}}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["message"].as_str().unwrap().contains("price"));
}

#[tokio::test]
async fn test_update_invalid_id() {
    let router = test_router(MemoryStore::new());

    let (status, body) = put(&router, "/update/not-an-id", json!({"name": "Widget"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_id");
}
