//! In-memory catalog.

use std::path::Path;
use std::sync::Arc;

use techpulse_core::{CatalogQuery, Product, ProductId, ProductInput};
use tokio::sync::RwLock;

use super::{CatalogError, CatalogStore, load_seed_file};

/// Products held in a shared vector, in insertion order.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }

    /// Build a catalog from a JSON seed file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Seed`] if the file is unreadable or invalid.
    pub async fn from_seed_file(path: &Path) -> Result<Self, CatalogError> {
        Ok(Self::new(load_seed_file(path).await?))
    }
}

impl CatalogStore for InMemoryCatalog {
    async fn list(&self, query: &CatalogQuery) -> Result<Vec<Product>, CatalogError> {
        let products = self.products.read().await;
        Ok(query.apply(products.iter().cloned()))
    }

    async fn get(&self, id: &ProductId) -> Result<Product, CatalogError> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }

    async fn create(&self, input: ProductInput) -> Result<Product, CatalogError> {
        let product = input.into_new_product(ProductId::generate())?;
        self.products.write().await.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: &ProductId, input: ProductInput) -> Result<Product, CatalogError> {
        let mut products = self.products.write().await;
        let slot = products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        let updated = input.apply_to(slot)?;
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: &ProductId) -> Result<Product, CatalogError> {
        let mut products = self.products.write().await;
        let idx = products
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        Ok(products.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use techpulse_core::{Category, InputError, Price, SortOption};

    use super::*;

    fn input(title: &str, cents: i64) -> ProductInput {
        ProductInput {
            title: title.to_string(),
            description: "A gadget.".to_string(),
            category: Category::SmartHome,
            price: Price::from_cents(cents).expect("price"),
            original_price: None,
            image_urls: vec!["https://cdn.techpulse.com/g.jpg".to_string()],
            video_url: None,
            labels: vec!["new".to_string()],
        }
    }

    #[tokio::test]
    async fn test_crud_cycle() {
        let catalog = InMemoryCatalog::default();

        let created = catalog.create(input("Hub", 4_999)).await.expect("create");
        assert_eq!(created.reviews_count, 0);
        assert_eq!(created.rating, Decimal::ZERO);
        assert_eq!(catalog.get(&created.id).await.expect("get"), created);

        let updated = catalog
            .update(&created.id, input("Hub Pro", 7_999))
            .await
            .expect("update");
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Hub Pro");

        let removed = catalog.delete(&created.id).await.expect("delete");
        assert_eq!(removed.title, "Hub Pro");
        assert!(matches!(
            catalog.get(&created.id).await,
            Err(CatalogError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let catalog = InMemoryCatalog::default();
        let mut bad = input("Hub", 4_999);
        bad.original_price = Some(Price::from_cents(100).expect("price"));

        assert!(matches!(
            catalog.create(bad).await,
            Err(CatalogError::Invalid(InputError::OriginalBelowPrice { .. }))
        ));
        assert!(catalog.list(&CatalogQuery::default()).await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn test_list_applies_query() {
        let catalog = InMemoryCatalog::default();
        catalog.create(input("Beta", 300)).await.expect("create");
        catalog.create(input("Alpha", 100)).await.expect("create");

        let query = CatalogQuery {
            sort: SortOption::NameAsc,
            ..CatalogQuery::default()
        };
        let titles: Vec<String> = catalog
            .list(&query)
            .await
            .expect("list")
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["Alpha", "Beta"]);
    }

    #[tokio::test]
    async fn test_update_missing() {
        let catalog = InMemoryCatalog::default();
        assert!(matches!(
            catalog.update(&ProductId::new("nope"), input("x", 1)).await,
            Err(CatalogError::NotFound(_))
        ));
    }
}
