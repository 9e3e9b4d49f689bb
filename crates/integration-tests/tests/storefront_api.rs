//! JSON API exercised through the router without a network listener.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use techpulse_integration_tests::{sample_catalog, test_state};
use techpulse_storefront::routes;
use tower::ServiceExt;

fn app() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = routes::app(test_state(dir.path(), sample_catalog()));
    (app, dir)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, value)
}

fn ids(value: &Value) -> Vec<&str> {
    value
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|p| p.get("id").and_then(Value::as_str))
        .collect()
}

fn new_product() -> Value {
    json!({
        "title": "Nimbus Hub",
        "description": "Smart home hub.",
        "category": "smart-home",
        "price": "79.00",
        "originalPrice": "99.00",
        "imageUrls": ["https://cdn.techpulse.com/hub.jpg"],
        "labels": ["New"]
    })
}

#[tokio::test]
async fn test_health() {
    let (app, _dir) = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("ok"));
}

#[tokio::test]
async fn test_list_filters_and_sorts() {
    let (app, _dir) = app();

    let (status, body) = send(&app, Method::GET, "/api/products?category=audio&sort=price-desc", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["studio-cans", "echo-buds"]);

    let (_, body) = send(&app, Method::GET, "/api/products?price=under-500&sort=price-asc&limit=2", None).await;
    assert_eq!(ids(&body), vec!["echo-buds", "pulse-watch"]);

    let (_, body) = send(&app, Method::GET, "/api/products?category=all", None).await;
    assert_eq!(ids(&body).len(), 5);
}

#[tokio::test]
async fn test_list_rejects_unknown_sort() {
    let (app, _dir) = app();
    let (status, body) = send(&app, Method::GET, "/api/products?sort=cheapest", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn test_show_missing_product_is_404() {
    let (app, _dir) = app();
    let (status, body) = send(&app, Method::GET, "/api/products/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Product nope not found" }));
}

#[tokio::test]
async fn test_admin_create_update_delete() {
    let (app, _dir) = app();

    let (status, created) = send(&app, Method::POST, "/admin/api/products", Some(new_product())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created.get("id").and_then(Value::as_str).expect("id").to_owned();
    assert_eq!(created.get("reviewsCount"), Some(&json!(0)));

    let (status, shown) = send(&app, Method::GET, &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shown.get("title"), Some(&json!("Nimbus Hub")));

    let mut edited = new_product();
    edited["title"] = json!("Nimbus Hub 2");
    let (status, updated) = send(&app, Method::PUT, &format!("/admin/api/products/{id}"), Some(edited)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated.get("title"), Some(&json!("Nimbus Hub 2")));
    assert_eq!(updated.get("id"), Some(&json!(id)));

    let (status, _) = send(&app, Method::DELETE, &format!("/admin/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_create_rejects_invalid_form() {
    let (app, _dir) = app();
    let mut invalid = new_product();
    invalid["imageUrls"] = json!([]);

    let (status, body) = send(&app, Method::POST, "/admin/api/products", Some(invalid)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body.get("error")
            .and_then(Value::as_str)
            .is_some_and(|e| e.contains("images"))
    );
}

#[tokio::test]
async fn test_import_invalid_url_is_422() {
    let (app, _dir) = app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/admin/api/products/import",
        Some(json!({ "url": "not a url" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_import_without_model_is_502() {
    let (app, _dir) = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/admin/api/products/import",
        Some(json!({ "url": "https://shop.example.com/item/9" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        body,
        json!({ "error": "Failed to import product. Please check the URL and try again." })
    );
}

#[tokio::test]
async fn test_suggestions_fall_back_without_model() {
    let (app, _dir) = app();
    let history = json!([{
        "id": "pulse-watch",
        "category": "wearables",
        "title": "Product pulse-watch",
        "price": "249.00"
    }]);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/products/echo-buds/suggestions",
        Some(json!({ "viewingHistory": history, "numberOfSuggestions": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["studio-cans", "sky-drone"]);
}

fn history_entry(id: &str) -> Value {
    json!({
        "id": id,
        "category": "audio",
        "title": format!("Product {id}"),
        "price": "10.00"
    })
}

#[tokio::test]
async fn test_suggestions_history_is_bounded_and_deduplicated() {
    let (app, _dir) = app();
    // Seven entries with one repeat: only the first five distinct ids count,
    // so sky-drone falls outside the history and becomes eligible again.
    let history: Vec<Value> = [
        "pulse-watch",
        "pulse-watch",
        "gone-1",
        "gone-2",
        "gone-3",
        "gone-4",
        "sky-drone",
    ]
    .into_iter()
    .map(history_entry)
    .collect();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/products/echo-buds/suggestions",
        Some(json!({ "viewingHistory": history, "numberOfSuggestions": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["studio-cans", "sky-drone", "ultra-book"]);
}

#[tokio::test]
async fn test_suggestions_reject_oversized_count() {
    let (app, _dir) = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/products/echo-buds/suggestions",
        Some(json!({ "viewingHistory": [], "numberOfSuggestions": u64::MAX })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn test_suggestions_for_missing_product_is_404() {
    let (app, _dir) = app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/products/nope/suggestions",
        Some(json!({ "viewingHistory": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
