//! Product page suggestions.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use techpulse_core::{CatalogQuery, Product, ProductId, ViewingHistory, ViewingHistoryEntry};

use crate::ai::{DEFAULT_SUGGESTION_COUNT, MAX_SUGGESTION_COUNT, SuggestionRequest};
use crate::catalog::CatalogStore;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Request body: the client's viewing history.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionBody {
    /// Most recent first. Repeats and entries past the history bound are
    /// dropped.
    #[serde(default)]
    pub viewing_history: ViewingHistory,
    pub number_of_suggestions: Option<usize>,
}

/// Suggest products for the product page `id`, drawing from the full
/// catalog listing.
pub async fn suggest(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<SuggestionBody>,
) -> Result<Json<Vec<Product>>> {
    let number_of_suggestions = body
        .number_of_suggestions
        .unwrap_or(DEFAULT_SUGGESTION_COUNT);
    if number_of_suggestions > MAX_SUGGESTION_COUNT {
        return Err(AppError::BadRequest(format!(
            "numberOfSuggestions must be at most {MAX_SUGGESTION_COUNT}"
        )));
    }

    let current = state.catalog().get(&ProductId::new(id)).await?;
    let pool = state.catalog().list(&CatalogQuery::default()).await?;

    let request = SuggestionRequest {
        viewing_history: body.viewing_history.excluding(&current.id),
        current_product: ViewingHistoryEntry::from(&current),
        number_of_suggestions,
    };

    Ok(Json(state.suggester().suggest(&request, &pool).await))
}
