//! `PostgreSQL` catalog: one JSONB document per product.

use sqlx::PgPool;
use sqlx::types::Json;
use techpulse_core::{CatalogQuery, Product, ProductId, ProductInput};
use tracing::instrument;

use super::{CatalogError, CatalogStore};

/// Catalog backed by the `products` table.
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

type DocumentRow = (String, serde_json::Value);

fn decode((id, document): DocumentRow) -> Result<Product, CatalogError> {
    serde_json::from_value(document).map_err(|e| CatalogError::Corrupt {
        id,
        reason: e.to_string(),
    })
}

impl PgCatalog {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or replace products by id in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Database` if any write fails; nothing is
    /// committed in that case.
    #[instrument(skip(self, products), fields(count = products.len()))]
    pub async fn upsert_all(&self, products: &[Product]) -> Result<usize, CatalogError> {
        let mut tx = self.pool.begin().await?;
        for product in products {
            sqlx::query(
                r"
                INSERT INTO products (id, document)
                VALUES ($1, $2)
                ON CONFLICT (id) DO UPDATE
                SET document = EXCLUDED.document, updated_at = now()
                ",
            )
            .bind(product.id.as_str())
            .bind(Json(product))
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(products.len())
    }
}

impl CatalogStore for PgCatalog {
    #[instrument(skip(self))]
    async fn list(&self, query: &CatalogQuery) -> Result<Vec<Product>, CatalogError> {
        let rows: Vec<DocumentRow> = sqlx::query_as(
            r"
            SELECT id, document
            FROM products
            WHERE $1::text IS NULL OR document->>'category' = $1
            ORDER BY created_at, id
            ",
        )
        .bind(query.category.map(|c| c.key()))
        .fetch_all(&self.pool)
        .await?;

        let products = rows.into_iter().map(decode).collect::<Result<Vec<_>, _>>()?;
        Ok(query.apply(products))
    }

    async fn get(&self, id: &ProductId) -> Result<Product, CatalogError> {
        let row: Option<DocumentRow> =
            sqlx::query_as("SELECT id, document FROM products WHERE id = $1")
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await?;

        row.map_or_else(|| Err(CatalogError::NotFound(id.clone())), decode)
    }

    #[instrument(skip(self, input), fields(title = %input.title))]
    async fn create(&self, input: ProductInput) -> Result<Product, CatalogError> {
        let product = input.into_new_product(ProductId::generate())?;

        sqlx::query("INSERT INTO products (id, document) VALUES ($1, $2)")
            .bind(product.id.as_str())
            .bind(Json(&product))
            .execute(&self.pool)
            .await?;

        tracing::info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: &ProductId, input: ProductInput) -> Result<Product, CatalogError> {
        let mut tx = self.pool.begin().await?;

        let row: Option<DocumentRow> =
            sqlx::query_as("SELECT id, document FROM products WHERE id = $1 FOR UPDATE")
                .bind(id.as_str())
                .fetch_optional(&mut *tx)
                .await?;
        let existing = row.map_or_else(|| Err(CatalogError::NotFound(id.clone())), decode)?;
        let updated = input.apply_to(&existing)?;

        sqlx::query("UPDATE products SET document = $2, updated_at = now() WHERE id = $1")
            .bind(id.as_str())
            .bind(Json(&updated))
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!(product_id = %id, "Product updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &ProductId) -> Result<Product, CatalogError> {
        let row: Option<DocumentRow> =
            sqlx::query_as("DELETE FROM products WHERE id = $1 RETURNING id, document")
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await?;

        let removed = row.map_or_else(|| Err(CatalogError::NotFound(id.clone())), decode)?;
        tracing::info!(product_id = %id, "Product deleted");
        Ok(removed)
    }
}
