//! AI product import.

use techpulse_core::{Category, ProductInput};
use techpulse_storefront::ai::ProductImporter;

use super::Context;
use crate::output;

/// Extract a product draft from `url` and print it. With a category, also
/// print the product form the draft prefills.
///
/// # Errors
///
/// Returns an error if the model is unavailable or the import fails.
pub async fn import(
    ctx: &Context,
    url: &str,
    category: Option<Category>,
) -> Result<(), Box<dyn std::error::Error>> {
    let importer = ProductImporter::new(ctx.model()?, ctx.config.ai.timeout);
    let draft = importer.import(url).await?;
    output::draft(&draft);

    if let Some(category) = category {
        let prefill = ProductInput::from_draft(draft, category);
        output::json("Prefilled product form", &prefill)?;
    }
    Ok(())
}
