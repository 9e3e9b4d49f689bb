//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                          - Health check
//!
//! # Catalog
//! GET    /api/products                    - Product listing (?category=&price=&sort=&limit=)
//! GET    /api/products/{id}               - Product detail
//! POST   /api/products/{id}/suggestions   - Suggestions for a product page
//!
//! # Admin
//! POST   /admin/api/products              - Create product
//! PUT    /admin/api/products/{id}         - Update product
//! DELETE /admin/api/products/{id}         - Delete product
//! POST   /admin/api/products/import       - Import a product draft from a URL
//! ```
//!
//! The cart and viewing history are client-local and have no routes.

pub mod admin;
pub mod products;
pub mod suggestions;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the public catalog routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
        .route("/{id}/suggestions", post(suggestions::suggest))
}

/// Create the admin product routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(admin::create))
        .route("/import", post(admin::import))
        .route("/{id}", put(admin::update).delete(admin::delete))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api/products", product_routes())
        .nest("/admin/api/products", admin_routes())
}

/// The complete application with state and HTTP middleware applied.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
