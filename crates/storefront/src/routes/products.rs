//! Catalog read handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use techpulse_core::{CatalogQuery, Category, Product, ProductId};

use crate::catalog::CatalogStore;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Listing query parameters, as raw strings so unknown values produce a
/// readable error.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub price: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<usize>,
}

impl TryFrom<ListParams> for CatalogQuery {
    type Error = AppError;

    fn try_from(params: ListParams) -> Result<Self> {
        let category = params
            .category
            .filter(|c| !c.is_empty() && c != "all")
            .map(|c| c.parse::<Category>())
            .transpose()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        Ok(Self {
            category,
            price: params.price.as_deref().unwrap_or_default().parse()?,
            sort: params.sort.as_deref().unwrap_or_default().parse()?,
            limit: params.limit,
        })
    }
}

/// List products.
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Product>>> {
    let query = CatalogQuery::try_from(params)?;
    Ok(Json(state.catalog().list(&query).await?))
}

/// Show a single product.
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    Ok(Json(state.catalog().get(&ProductId::new(id)).await?))
}
