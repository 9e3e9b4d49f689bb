//! Product suggestions from viewing history.
//!
//! The model only ranks: it answers with product ids, and every id is
//! checked against the eligible candidates before a product is returned.
//! Any model failure degrades to the deterministic fallback, so
//! [`ProductSuggester::suggest`] never errors.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use techpulse_core::{Product, ProductId, ViewingHistoryEntry};
use tracing::instrument;

use super::{GenerativeModel, ModelError, StructuredRequest};

/// Suggestions returned when the caller does not ask for a count.
pub const DEFAULT_SUGGESTION_COUNT: usize = 3;

/// Largest count the HTTP surface accepts.
pub const MAX_SUGGESTION_COUNT: usize = 12;

const TOOL_NAME: &str = "recommend_products";

const SYSTEM_PROMPT: &str = "You are an expert product recommendation engine for an online store.";

const fn default_count() -> usize {
    DEFAULT_SUGGESTION_COUNT
}

/// What the shopper has looked at and what they are looking at now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    /// Most recent first.
    #[serde(default)]
    pub viewing_history: Vec<ViewingHistoryEntry>,
    pub current_product: ViewingHistoryEntry,
    #[serde(default = "default_count")]
    pub number_of_suggestions: usize,
}

impl SuggestionRequest {
    /// Ids that may not be suggested: the current product and everything
    /// in the history.
    fn excluded_ids(&self) -> HashSet<&ProductId> {
        self.viewing_history
            .iter()
            .map(|entry| &entry.id)
            .chain(std::iter::once(&self.current_product.id))
            .collect()
    }
}

/// Pool products that are neither excluded nor repeated, in pool order.
#[must_use]
pub fn eligible_candidates<'a>(request: &SuggestionRequest, pool: &'a [Product]) -> Vec<&'a Product> {
    let excluded = request.excluded_ids();
    let mut seen: HashSet<&ProductId> = HashSet::new();
    pool.iter()
        .filter(|product| !excluded.contains(&product.id) && seen.insert(&product.id))
        .collect()
}

/// The first `number_of_suggestions` eligible products in pool order.
#[must_use]
pub fn fallback_suggestions(request: &SuggestionRequest, pool: &[Product]) -> Vec<Product> {
    eligible_candidates(request, pool)
        .into_iter()
        .take(request.number_of_suggestions)
        .cloned()
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Recommendation {
    product_ids: Vec<String>,
}

/// Ranks candidate products with a model.
#[derive(Debug, Clone)]
pub struct ProductSuggester<M> {
    model: M,
    timeout: Duration,
}

impl<M: GenerativeModel> ProductSuggester<M> {
    #[must_use]
    pub const fn new(model: M, timeout: Duration) -> Self {
        Self { model, timeout }
    }

    /// Pick up to `number_of_suggestions` products from `pool`.
    ///
    /// Model picks come first in the model's order. If the model fails or
    /// returns fewer usable ids than requested, the remainder is filled from
    /// the fallback order.
    #[instrument(
        skip(self, request, pool),
        fields(
            current = %request.current_product.id,
            requested = request.number_of_suggestions,
            pool = pool.len()
        )
    )]
    pub async fn suggest(&self, request: &SuggestionRequest, pool: &[Product]) -> Vec<Product> {
        let eligible = eligible_candidates(request, pool);
        let wanted = request.number_of_suggestions.min(eligible.len());
        if wanted == 0 {
            return Vec::new();
        }

        let picked_ids = match self.ask_model(request, &eligible, wanted).await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(error = %e, "Suggestion model unavailable, using fallback");
                Vec::new()
            }
        };

        let mut chosen: Vec<&Product> = Vec::with_capacity(wanted);
        for id in &picked_ids {
            if chosen.len() == wanted {
                break;
            }
            match eligible.iter().find(|p| p.id.as_str() == id) {
                Some(product) if !chosen.iter().any(|c| c.id == product.id) => {
                    chosen.push(product);
                }
                Some(_) => tracing::debug!(%id, "Dropping repeated suggestion"),
                None => tracing::debug!(%id, "Dropping ineligible suggestion"),
            }
        }

        let from_model = chosen.len();
        for product in &eligible {
            if chosen.len() == wanted {
                break;
            }
            if !chosen.iter().any(|c| c.id == product.id) {
                chosen.push(product);
            }
        }

        tracing::info!(
            from_model,
            topped_up = chosen.len() - from_model,
            "Suggestions ready"
        );
        chosen.into_iter().cloned().collect()
    }

    async fn ask_model(
        &self,
        request: &SuggestionRequest,
        eligible: &[&Product],
        wanted: usize,
    ) -> Result<Vec<String>, ModelError> {
        let structured = StructuredRequest {
            tool_name: TOOL_NAME.to_string(),
            tool_description: "Record the recommended product ids, best match first.".to_string(),
            system: SYSTEM_PROMPT.to_string(),
            prompt: suggestion_prompt(request, eligible, wanted),
            output_schema: recommendation_schema(wanted),
        };

        let raw = tokio::time::timeout(self.timeout, self.model.generate(structured))
            .await
            .map_err(|_| ModelError::Timeout(self.timeout))??;

        let recommendation: Recommendation = serde_json::from_value(raw)
            .map_err(|e| ModelError::Parse(format!("invalid recommendation: {e}")))?;
        Ok(recommendation.product_ids)
    }
}

fn recommendation_schema(count: usize) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "productIds": {
                "type": "array",
                "items": { "type": "string" },
                "maxItems": count,
                "description": "IDs of the recommended products, taken from the Products list."
            }
        },
        "required": ["productIds"]
    })
}

fn suggestion_prompt(request: &SuggestionRequest, eligible: &[&Product], wanted: usize) -> String {
    let mut prompt = format!(
        "Given the user's viewing history and the product they are currently viewing, \
recommend {wanted} similar products that the user might be interested in.\n\nUser Viewing History:\n"
    );

    if request.viewing_history.is_empty() {
        prompt.push_str("(none)\n");
    }
    for entry in &request.viewing_history {
        let _ = writeln!(
            prompt,
            "- Title: {}, Category: {}, Price: {}",
            entry.title, entry.category, entry.price
        );
    }

    let current = &request.current_product;
    let _ = write!(
        prompt,
        "\nCurrent Product:\n- Title: {}, Category: {}, Price: {}\n\nProducts:\n",
        current.title, current.category, current.price
    );
    for product in eligible {
        let _ = writeln!(
            prompt,
            "- ID: {}, Title: {}, Category: {}, Price: {}",
            product.id, product.title, product.category, product.price
        );
    }

    let _ = write!(
        prompt,
        "\nRecord your picks with the {TOOL_NAME} tool, using only IDs from the Products list."
    );
    prompt
}
