//! Anthropic Messages API client.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use crate::config::AiConfig;

use super::error::{ApiErrorResponse, ModelError};
use super::types::{ChatRequest, ChatResponse, Message, Tool, ToolChoice};
use super::{GenerativeModel, StructuredRequest};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Messages API client.
///
/// Cheap to clone; clones share the HTTP connection pool.
#[derive(Clone)]
pub struct ModelClient {
    inner: Arc<ModelClientInner>,
}

struct ModelClientInner {
    client: reqwest::Client,
    model: String,
    api_url: String,
    max_tokens: u32,
}

impl ModelClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Config` if the API key is not a valid header
    /// value, or `ModelError::Http` if the HTTP client cannot be built.
    pub fn new(api_key: &SecretString, config: &AiConfig) -> Result<Self, ModelError> {
        let mut key = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|_| ModelError::Config("API key is not a valid header value".to_string()))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("x-api-key", key);
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(ModelClientInner {
                client,
                model: config.model.clone(),
                api_url: config.api_url.clone(),
                max_tokens: config.max_tokens,
            }),
        })
    }

    /// Model name requests are sent with.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.inner.model
    }

    /// Send a chat request and wait for the complete response.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self, messages, system, tools), fields(model = %self.inner.model))]
    pub async fn chat(
        &self,
        messages: Vec<Message>,
        system: Option<String>,
        tools: Option<Vec<Tool>>,
        tool_choice: Option<ToolChoice>,
    ) -> Result<ChatResponse, ModelError> {
        let request = ChatRequest {
            model: self.inner.model.clone(),
            max_tokens: self.inner.max_tokens,
            messages,
            system,
            tools,
            tool_choice,
        };

        let response = self
            .inner
            .client
            .post(&self.inner.api_url)
            .json(&request)
            .send()
            .await?;

        let response = Self::handle_response(response).await?;
        tracing::debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            stop_reason = ?response.stop_reason,
            "Model response received"
        );
        Ok(response)
    }

    async fn handle_response(response: reqwest::Response) -> Result<ChatResponse, ModelError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| ModelError::Parse(format!("Failed to parse response: {e}")))
        } else {
            Err(Self::handle_error_status(status, response).await)
        }
    }

    async fn handle_error_status(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ModelError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return ModelError::RateLimited(retry_after);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return ModelError::Unauthorized("Invalid API key".to_string());
        }

        match response.text().await {
            Ok(body) => {
                if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&body) {
                    ModelError::Api {
                        error_type: api_error.error.error_type,
                        message: api_error.error.message,
                    }
                } else {
                    ModelError::Api {
                        error_type: status.to_string(),
                        message: body,
                    }
                }
            }
            Err(e) => ModelError::Http(e),
        }
    }
}

impl GenerativeModel for ModelClient {
    /// Force a call to a single tool whose input schema is the requested
    /// output schema and return that call's arguments.
    async fn generate(&self, request: StructuredRequest) -> Result<serde_json::Value, ModelError> {
        let StructuredRequest {
            tool_name,
            tool_description,
            system,
            prompt,
            output_schema,
        } = request;

        let tool = Tool {
            name: tool_name.clone(),
            description: tool_description,
            input_schema: output_schema,
        };
        let choice = ToolChoice::Tool {
            name: tool_name.clone(),
        };

        let response = self
            .chat(
                vec![Message::user(prompt)],
                Some(system),
                Some(vec![tool]),
                Some(choice),
            )
            .await?;

        response
            .tool_input(&tool_name)
            .ok_or(ModelError::MissingOutput(tool_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_client_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<ModelClient>();
    }

    #[test]
    fn test_model_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ModelClient>();
    }

    #[test]
    fn test_rejects_unprintable_key() {
        let key = SecretString::from("sk-ant-\nbroken");
        let result = ModelClient::new(&key, &AiConfig::default());
        assert!(matches!(result, Err(ModelError::Config(_))));
    }

    #[test]
    fn test_uses_configured_model() {
        let key = SecretString::from("sk-ant-REDACTED");
        let config = AiConfig {
            model: "claude-haiku".to_string(),
            ..AiConfig::default()
        };
        let client = ModelClient::new(&key, &config).expect("client");
        assert_eq!(client.model(), "claude-haiku");
    }
}
