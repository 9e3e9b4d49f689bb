//! Command implementations.
//!
//! Each command builds what it needs from a shared [`Context`]: client
//! storage for cart and history, the catalog, and the generative model.

pub mod browse;
pub mod cart;
pub mod import;
pub mod migrate;
pub mod seed;

use std::path::PathBuf;

use techpulse_storefront::ai::{ConfiguredModel, ModelError};
use techpulse_storefront::catalog::{Catalog, CatalogError};
use techpulse_storefront::config::{ConfigError, StorefrontConfig};
use techpulse_storefront::notify::CollectingNotifier;
use techpulse_storefront::session::{CartSession, HistorySession};
use techpulse_storefront::storage::FileStorage;

use crate::output;

/// Configuration plus the resolved client storage directory.
pub struct Context {
    pub config: StorefrontConfig,
    pub data_dir: PathBuf,
}

impl Context {
    /// Load configuration from the environment. An explicit `data_dir`
    /// overrides the configured one.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment configuration is invalid.
    pub fn load(data_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config = StorefrontConfig::from_env()?;
        let data_dir = data_dir.unwrap_or_else(|| config.data_dir.clone());
        Ok(Self { config, data_dir })
    }

    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.data_dir)
    }

    pub fn cart_session(&self) -> CartSession<FileStorage, CollectingNotifier> {
        CartSession::load(self.storage(), CollectingNotifier::new())
    }

    pub fn history_session(&self) -> HistorySession<FileStorage> {
        HistorySession::load(self.storage())
    }

    /// # Errors
    ///
    /// Returns an error if the database or seed file is unusable.
    pub async fn catalog(&self) -> Result<Catalog, CatalogError> {
        Catalog::from_config(&self.config).await
    }

    /// # Errors
    ///
    /// Returns an error if the model client cannot be built.
    pub fn model(&self) -> Result<ConfiguredModel, ModelError> {
        ConfiguredModel::from_config(&self.config.ai)
    }
}

/// Print and discard the notifications a cart session raised.
pub fn flush_notifications(session: CartSession<FileStorage, CollectingNotifier>) {
    let (_, _, notifier) = session.into_parts();
    for notification in notifier.drain() {
        output::notification(&notification);
    }
}
