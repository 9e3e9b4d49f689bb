//! Unified error handling with Sentry integration.
//!
//! Route handlers return `Result<T, AppError>`. Server-side failures are
//! captured to Sentry before a JSON `{ "error": ... }` body is returned;
//! internal details never reach the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use techpulse_core::QueryParseError;
use thiserror::Error;

use crate::ai::ImportError;
use crate::catalog::CatalogError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog store operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Product import failed.
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Unknown query parameter value.
    #[error("Bad query: {0}")]
    Query(#[from] QueryParseError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Catalog(CatalogError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Catalog(CatalogError::Invalid(_)) | Self::Query(_) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Import(ImportError::InvalidUrl(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Import(ImportError::Failed { .. }) => StatusCode::BAD_GATEWAY,
            Self::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Catalog(CatalogError::NotFound(id)) => format!("Product {id} not found"),
            Self::Catalog(CatalogError::Invalid(err)) => err.to_string(),
            Self::Catalog(_) => "Internal server error".to_string(),
            Self::Import(ImportError::InvalidUrl(_)) => {
                "Please provide a valid http(s) URL".to_string()
            }
            Self::Import(ImportError::Failed { .. }) => {
                "Failed to import product. Please check the URL and try again.".to_string()
            }
            Self::Query(err) => err.to_string(),
            Self::BadRequest(msg) => msg.clone(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use techpulse_core::{InputError, ProductId};

    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::Catalog(CatalogError::NotFound(ProductId::new("product-123")));
        assert!(err.to_string().starts_with("Catalog error: "));

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::Catalog(CatalogError::NotFound(ProductId::new("x")))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Catalog(CatalogError::Invalid(InputError::MissingTitle))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Import(ImportError::InvalidUrl("ftp://x".to_string()))),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(AppError::Import(ImportError::Failed {
                reason: "timeout".to_string()
            })),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            get_status(AppError::BadRequest("too many".to_string())),
            StatusCode::BAD_REQUEST
        );
    }
}
