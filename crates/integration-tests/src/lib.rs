//! Integration tests for Tech Pulse.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p techpulse-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_session` - Cart persistence, totals and checkout through client storage
//! - `viewing_history` - History bounds and persistence
//! - `ai_pipelines` - Import and suggestion pipelines against a scripted model
//! - `storefront_api` - JSON API through the router, no network
//!
//! Everything here runs without a database or API key: the catalog is held
//! in memory and the model is either scripted or disabled.

use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rust_decimal::Decimal;
use techpulse_core::{Category, Price, Product, ProductId, ProductImage};
use techpulse_storefront::ai::{ConfiguredModel, GenerativeModel, ModelError, StructuredRequest};
use techpulse_storefront::catalog::{Catalog, InMemoryCatalog};
use techpulse_storefront::config::{AiConfig, StorefrontConfig};
use techpulse_storefront::state::AppState;

/// A valid catalog product.
///
/// # Panics
///
/// Panics if `cents` is negative.
#[must_use]
pub fn product(id: &str, category: Category, cents: i64) -> Product {
    Product {
        id: ProductId::new(id),
        category,
        title: format!("Product {id}"),
        description: format!("Description of {id}"),
        price: Price::from_cents(cents).expect("non-negative price"),
        original_price: None,
        images: vec![ProductImage::from_url(format!(
            "https://cdn.techpulse.com/{id}.jpg"
        ))],
        labels: Vec::new(),
        reviews_count: 0,
        rating: Decimal::ZERO,
        video_url: None,
    }
}

/// A small mixed catalog, in listing order.
#[must_use]
pub fn sample_catalog() -> Vec<Product> {
    vec![
        product("pulse-watch", Category::Wearables, 24_900),
        product("echo-buds", Category::Audio, 12_900),
        product("studio-cans", Category::Audio, 54_900),
        product("sky-drone", Category::Drones, 89_900),
        product("ultra-book", Category::Laptops, 149_900),
    ]
}

/// Configuration for tests: in-memory catalog, no model key, client
/// storage under `data_dir`.
#[must_use]
pub fn test_config(data_dir: &Path) -> StorefrontConfig {
    StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        database_url: None,
        catalog_seed_path: data_dir.join("products.json"),
        data_dir: data_dir.to_path_buf(),
        ai: AiConfig::default(),
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// Application state over `products` with the model disabled.
#[must_use]
pub fn test_state(data_dir: &Path, products: Vec<Product>) -> AppState {
    AppState::with_model(
        test_config(data_dir),
        Catalog::Memory(InMemoryCatalog::new(products)),
        ConfiguredModel::Disabled,
    )
}

type Reply = fn(&StructuredRequest) -> Result<serde_json::Value, ModelError>;

/// A model that answers every call with a fixed function and counts calls.
#[derive(Clone)]
pub struct ScriptedModel {
    reply: Reply,
    calls: Arc<AtomicUsize>,
}

impl ScriptedModel {
    #[must_use]
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl GenerativeModel for ScriptedModel {
    async fn generate(&self, request: StructuredRequest) -> Result<serde_json::Value, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.reply)(&request)
    }
}
