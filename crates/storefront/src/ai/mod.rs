//! Generative-model pipelines.
//!
//! Both pipelines talk to the model through [`GenerativeModel`], which turns
//! a prompt plus a JSON schema into a JSON value. The production
//! implementation forces a tool call on the Messages API so the answer comes
//! back as tool arguments shaped by the schema. Pipeline code never trusts
//! the value it gets back and re-validates it in Rust.
//!
//! - [`ProductImporter`]: product page URL to [`ImportedProductDraft`](techpulse_core::ImportedProductDraft)
//! - [`ProductSuggester`]: viewing history and a candidate pool to ranked products

mod client;
mod error;
mod import;
mod suggest;
pub mod types;

use std::future::Future;

pub use client::ModelClient;
pub use error::{ApiError, ApiErrorResponse, ModelError};
pub use import::{ImportError, ProductImporter};
pub use suggest::{
    DEFAULT_SUGGESTION_COUNT, MAX_SUGGESTION_COUNT, ProductSuggester, SuggestionRequest,
    eligible_candidates, fallback_suggestions,
};

use crate::config::AiConfig;

/// A single structured-output call.
#[derive(Debug, Clone)]
pub struct StructuredRequest {
    /// Name of the tool the answer is delivered through.
    pub tool_name: String,
    pub tool_description: String,
    pub system: String,
    pub prompt: String,
    /// JSON schema of the expected answer.
    pub output_schema: serde_json::Value,
}

/// Something that answers prompts with schema-shaped JSON.
pub trait GenerativeModel: Send + Sync {
    /// Run one structured-output call.
    fn generate(
        &self,
        request: StructuredRequest,
    ) -> impl Future<Output = Result<serde_json::Value, ModelError>> + Send;
}

impl<M: GenerativeModel> GenerativeModel for std::sync::Arc<M> {
    fn generate(
        &self,
        request: StructuredRequest,
    ) -> impl Future<Output = Result<serde_json::Value, ModelError>> + Send {
        (**self).generate(request)
    }
}

/// The model selected by configuration.
#[derive(Clone)]
pub enum ConfiguredModel {
    Anthropic(ModelClient),
    /// No API key: import fails and suggestions use the fallback policy.
    Disabled,
}

impl ConfiguredModel {
    /// Build from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an API key is present but the client cannot be
    /// built from it.
    pub fn from_config(config: &AiConfig) -> Result<Self, ModelError> {
        match &config.api_key {
            Some(key) => Ok(Self::Anthropic(ModelClient::new(key, config)?)),
            None => {
                tracing::warn!("ANTHROPIC_API_KEY not set, AI features disabled");
                Ok(Self::Disabled)
            }
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        matches!(self, Self::Anthropic(_))
    }
}

impl GenerativeModel for ConfiguredModel {
    async fn generate(&self, request: StructuredRequest) -> Result<serde_json::Value, ModelError> {
        match self {
            Self::Anthropic(client) => client.generate(request).await,
            Self::Disabled => Err(ModelError::NotConfigured),
        }
    }
}
