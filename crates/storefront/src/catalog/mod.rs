//! Product catalog storage.
//!
//! [`CatalogStore`] is the document-store seam: list/get/create/update/delete
//! over [`Product`] records. [`InMemoryCatalog`] serves development and
//! tests from a JSON seed file; [`PgCatalog`] keeps one JSONB document per
//! product in `PostgreSQL`. [`Catalog`] picks one at startup.

mod memory;
mod postgres;

use std::future::Future;
use std::path::{Path, PathBuf};

use techpulse_core::{CatalogQuery, InputError, Product, ProductError, ProductId, ProductInput};
use thiserror::Error;

use crate::config::StorefrontConfig;
use crate::db;

pub use memory::InMemoryCatalog;
pub use postgres::PgCatalog;

/// Catalog failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("product {0} not found")]
    NotFound(ProductId),

    #[error("invalid product: {0}")]
    Invalid(#[from] InputError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored document no longer decodes into a product.
    #[error("corrupt catalog document {id}: {reason}")]
    Corrupt { id: String, reason: String },

    #[error("cannot load seed file {path}: {reason}")]
    Seed { path: PathBuf, reason: String },
}

/// Async CRUD and query access to the product catalog.
pub trait CatalogStore: Send + Sync {
    /// Products matching `query`, filtered, sorted and truncated.
    fn list(
        &self,
        query: &CatalogQuery,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    fn get(&self, id: &ProductId) -> impl Future<Output = Result<Product, CatalogError>> + Send;

    /// Validate `input` and store it under a fresh id with no reviews.
    fn create(
        &self,
        input: ProductInput,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send;

    /// Replace the editable fields of an existing product.
    fn update(
        &self,
        id: &ProductId,
        input: ProductInput,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send;

    /// Delete a product, returning what was removed.
    fn delete(&self, id: &ProductId) -> impl Future<Output = Result<Product, CatalogError>> + Send;
}

/// The catalog implementation chosen by configuration.
#[derive(Clone)]
pub enum Catalog {
    Memory(InMemoryCatalog),
    Postgres(PgCatalog),
}

impl CatalogStore for Catalog {
    async fn list(&self, query: &CatalogQuery) -> Result<Vec<Product>, CatalogError> {
        match self {
            Self::Memory(store) => store.list(query).await,
            Self::Postgres(store) => store.list(query).await,
        }
    }

    async fn get(&self, id: &ProductId) -> Result<Product, CatalogError> {
        match self {
            Self::Memory(store) => store.get(id).await,
            Self::Postgres(store) => store.get(id).await,
        }
    }

    async fn create(&self, input: ProductInput) -> Result<Product, CatalogError> {
        match self {
            Self::Memory(store) => store.create(input).await,
            Self::Postgres(store) => store.create(input).await,
        }
    }

    async fn update(&self, id: &ProductId, input: ProductInput) -> Result<Product, CatalogError> {
        match self {
            Self::Memory(store) => store.update(id, input).await,
            Self::Postgres(store) => store.update(id, input).await,
        }
    }

    async fn delete(&self, id: &ProductId) -> Result<Product, CatalogError> {
        match self {
            Self::Memory(store) => store.delete(id).await,
            Self::Postgres(store) => store.delete(id).await,
        }
    }
}

impl Catalog {
    /// `PostgreSQL` when a database URL is configured, otherwise the seed
    /// file loaded into memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable or the seed file is
    /// invalid.
    pub async fn from_config(config: &StorefrontConfig) -> Result<Self, CatalogError> {
        match &config.database_url {
            Some(url) => {
                let pool = db::create_pool(url).await?;
                tracing::info!("Using PostgreSQL catalog");
                Ok(Self::Postgres(PgCatalog::new(pool)))
            }
            None => {
                tracing::info!(
                    seed = %config.catalog_seed_path.display(),
                    "No database configured, using in-memory catalog"
                );
                Ok(Self::Memory(
                    InMemoryCatalog::from_seed_file(&config.catalog_seed_path).await?,
                ))
            }
        }
    }
}

/// Read and validate a JSON array of products.
///
/// # Errors
///
/// Returns [`CatalogError::Seed`] if the file cannot be read or parsed, or
/// if any product breaks a catalog invariant.
pub async fn load_seed_file(path: &Path) -> Result<Vec<Product>, CatalogError> {
    let seed_error = |reason: String| CatalogError::Seed {
        path: path.to_path_buf(),
        reason,
    };

    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| seed_error(e.to_string()))?;
    let products: Vec<Product> = serde_json::from_str(&raw).map_err(|e| seed_error(e.to_string()))?;

    for product in &products {
        product
            .validate()
            .map_err(|e: ProductError| seed_error(format!("product {}: {e}", product.id)))?;
    }

    tracing::info!(path = %path.display(), count = products.len(), "Loaded catalog seed");
    Ok(products)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn test_load_seed_file_validates() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(
            file,
            r#"[{{"id":"p1","category":"audio","title":"Buds","price":"10.00","images":[]}}]"#
        )
        .expect("write");

        let err = load_seed_file(file.path()).await.expect_err("no images");
        assert!(err.to_string().contains("product p1"));
    }

    #[tokio::test]
    async fn test_load_seed_file_missing() {
        let err = load_seed_file(Path::new("/nonexistent/products.json"))
            .await
            .expect_err("missing");
        assert!(matches!(err, CatalogError::Seed { .. }));
    }
}
