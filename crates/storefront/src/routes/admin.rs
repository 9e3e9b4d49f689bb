//! Admin product management handlers.
//!
//! These routes carry no authentication of their own; deployments put them
//! behind the admin gateway.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use techpulse_core::{Category, ImportedProductDraft, Product, ProductId, ProductInput};

use crate::catalog::CatalogStore;
use crate::error::{Result, add_breadcrumb};
use crate::state::AppState;

/// Import request body.
#[derive(Debug, Deserialize)]
pub struct ImportBody {
    pub url: String,
    /// When set, the response also carries a prefilled product form.
    #[serde(default)]
    pub category: Option<Category>,
}

/// Import response: the draft and, if a category was given, the product
/// form it prefills.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub draft: ImportedProductDraft,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefill: Option<ProductInput>,
}

/// Create a product.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = state.catalog().create(input).await?;
    add_breadcrumb("admin", "Product created", Some(&[("product_id", product.id.as_str())]));
    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace a product's editable fields.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>> {
    let product = state.catalog().update(&ProductId::new(id), input).await?;
    add_breadcrumb("admin", "Product updated", Some(&[("product_id", product.id.as_str())]));
    Ok(Json(product))
}

/// Delete a product.
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    let removed = state.catalog().delete(&ProductId::new(id)).await?;
    add_breadcrumb("admin", "Product deleted", Some(&[("product_id", removed.id.as_str())]));
    Ok(StatusCode::NO_CONTENT)
}

/// Extract a product draft from a product page URL.
pub async fn import(
    State(state): State<AppState>,
    Json(body): Json<ImportBody>,
) -> Result<Json<ImportResponse>> {
    let draft = state.importer().import(&body.url).await?;
    let prefill = body
        .category
        .map(|category| ProductInput::from_draft(draft.clone(), category));
    Ok(Json(ImportResponse { draft, prefill }))
}
