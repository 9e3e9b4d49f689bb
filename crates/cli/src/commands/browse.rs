//! Catalog browsing: listing, product views, history and suggestions.

use techpulse_core::{CatalogQuery, Category, ProductId, ViewingHistoryEntry};
use techpulse_storefront::ai::{DEFAULT_SUGGESTION_COUNT, ProductSuggester, SuggestionRequest};
use techpulse_storefront::catalog::CatalogStore;

use super::Context;
use crate::output;

/// List catalog products.
///
/// # Errors
///
/// Returns an error for unknown filter or sort keys, or if the catalog is
/// unavailable.
pub async fn products(
    ctx: &Context,
    category: Option<Category>,
    price: &str,
    sort: &str,
    limit: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let query = CatalogQuery {
        category,
        price: price.parse()?,
        sort: sort.parse()?,
        limit,
    };
    let products = ctx.catalog().await?.list(&query).await?;
    output::product_list(&query, &products);
    Ok(())
}

/// Open a product: show it, record the view and print suggestions drawn
/// from the rest of the catalog.
///
/// The history handed to the suggester is the one from before this view,
/// minus the product itself.
///
/// # Errors
///
/// Returns an error if the product does not exist or the catalog or model
/// client cannot be set up.
pub async fn view(ctx: &Context, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = ctx.catalog().await?;
    let product = catalog.get(&ProductId::new(id)).await?;
    output::product(&product);

    let mut history = ctx.history_session();
    let request = SuggestionRequest {
        viewing_history: history.excluding(&product.id),
        current_product: ViewingHistoryEntry::from(&product),
        number_of_suggestions: DEFAULT_SUGGESTION_COUNT,
    };
    history.record(&product);

    let pool = catalog.list(&CatalogQuery::default()).await?;
    let suggester = ProductSuggester::new(ctx.model()?, ctx.config.ai.timeout);
    let suggestions = suggester.suggest(&request, &pool).await;
    output::suggestions(&suggestions);
    Ok(())
}

pub fn history(ctx: &Context) {
    let session = ctx.history_session();
    output::history(session.entries());
}
