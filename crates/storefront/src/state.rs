//! Application state shared across handlers.

use std::sync::Arc;

use crate::ai::{ConfiguredModel, ModelError, ProductImporter, ProductSuggester};
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Everything inside is read-mostly; the
/// catalog does its own locking.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    importer: ProductImporter<ConfiguredModel>,
    suggester: ProductSuggester<ConfiguredModel>,
}

impl AppState {
    /// Create application state, building the model client from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the model client cannot be built.
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Result<Self, ModelError> {
        let model = ConfiguredModel::from_config(&config.ai)?;
        Ok(Self::with_model(config, catalog, model))
    }

    /// Create application state around an existing model.
    #[must_use]
    pub fn with_model(config: StorefrontConfig, catalog: Catalog, model: ConfiguredModel) -> Self {
        let timeout = config.ai.timeout;
        Self {
            inner: Arc::new(AppStateInner {
                importer: ProductImporter::new(model.clone(), timeout),
                suggester: ProductSuggester::new(model, timeout),
                config,
                catalog,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn importer(&self) -> &ProductImporter<ConfiguredModel> {
        &self.inner.importer
    }

    #[must_use]
    pub fn suggester(&self) -> &ProductSuggester<ConfiguredModel> {
        &self.inner.suggester
    }
}
