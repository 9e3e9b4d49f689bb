//! Product import: product page URL to a validated draft.

use std::time::Duration;

use techpulse_core::{ImportedProductDraft, parse_absolute_url};
use thiserror::Error;
use tracing::instrument;

use super::{GenerativeModel, ModelError, StructuredRequest};

const TOOL_NAME: &str = "record_product";

const SYSTEM_PROMPT: &str = "You are an expert web scraping agent. \
Your task is to extract product information from a given URL.";

/// Import failures.
///
/// Everything after URL validation collapses into [`ImportError::Failed`];
/// the reason is for logs, not for users.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("not an absolute http(s) URL: {0}")]
    InvalidUrl(String),

    #[error("product import failed: {reason}")]
    Failed { reason: String },
}

impl ImportError {
    fn failed(reason: impl ToString) -> Self {
        Self::Failed {
            reason: reason.to_string(),
        }
    }
}

/// Runs the import prompt against a model.
#[derive(Debug, Clone)]
pub struct ProductImporter<M> {
    model: M,
    timeout: Duration,
}

impl<M: GenerativeModel> ProductImporter<M> {
    #[must_use]
    pub const fn new(model: M, timeout: Duration) -> Self {
        Self { model, timeout }
    }

    /// Extract a product draft from the page at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::InvalidUrl`] without calling the model if `url`
    /// is not an absolute http(s) URL, and [`ImportError::Failed`] for any
    /// model, timeout or validation failure.
    #[instrument(skip(self))]
    pub async fn import(&self, url: &str) -> Result<ImportedProductDraft, ImportError> {
        let url = parse_absolute_url(url).ok_or_else(|| ImportError::InvalidUrl(url.to_owned()))?;

        let request = StructuredRequest {
            tool_name: TOOL_NAME.to_string(),
            tool_description: "Record the product details extracted from the page.".to_string(),
            system: SYSTEM_PROMPT.to_string(),
            prompt: import_prompt(url.as_str()),
            output_schema: ImportedProductDraft::json_schema(),
        };

        let raw = tokio::time::timeout(self.timeout, self.model.generate(request))
            .await
            .map_err(|_| ModelError::Timeout(self.timeout))
            .and_then(|result| result)
            .map_err(|e| {
                tracing::warn!(error = %e, "Import model call failed");
                ImportError::failed(e)
            })?;

        let draft = ImportedProductDraft::from_value(raw).map_err(|e| {
            tracing::warn!(error = %e, "Import returned an invalid draft");
            ImportError::failed(e)
        })?;

        tracing::info!(
            title = %draft.title,
            price = %draft.price,
            images = draft.images.len(),
            "Product imported"
        );
        Ok(draft)
    }
}

fn import_prompt(url: &str) -> String {
    format!(
        "Analyze the content of the following URL: {url}

Extract the following information:
- Product Title: Look for the main product title, usually in an H1 tag.
- Product Description: Find the detailed product description. Clean it up by removing any HTML tags, promotional text, or scripts.
- Product Price: Find the main product price. Extract it as a number, removing any currency symbols or commas.
- Product Images: Find the main product images. Extract the URLs of at least {count} high-quality images if available.

Record the result with the {TOOL_NAME} tool.",
        count = ImportedProductDraft::TARGET_IMAGE_COUNT,
    )
}
