//! Import and suggestion pipelines against a scripted model.

use std::time::Duration;

use serde_json::json;
use techpulse_core::{Category, Price, ProductInput, ViewingHistoryEntry};
use techpulse_integration_tests::{ScriptedModel, product, sample_catalog};
use techpulse_storefront::ai::{
    ConfiguredModel, ImportError, ModelError, ProductImporter, ProductSuggester,
    SuggestionRequest,
};

const TIMEOUT: Duration = Duration::from_secs(5);

fn request_for(current: &str, history: &[&str], count: usize) -> SuggestionRequest {
    let catalog = sample_catalog();
    let entry = |id: &str| {
        catalog
            .iter()
            .find(|p| p.id.as_str() == id)
            .map(ViewingHistoryEntry::from)
            .expect("product in sample catalog")
    };
    SuggestionRequest {
        viewing_history: history.iter().map(|id| entry(id)).collect(),
        current_product: entry(current),
        number_of_suggestions: count,
    }
}

fn ids(products: &[techpulse_core::Product]) -> Vec<&str> {
    products.iter().map(|p| p.id.as_str()).collect()
}

#[tokio::test]
async fn test_import_builds_draft_and_prefill() {
    let model = ScriptedModel::new(|request| {
        assert!(request.prompt.contains("https://shop.example.com/item/9"));
        Ok(json!({
            "title": "  Aurora Smart Lamp ",
            "description": "Color changing lamp.",
            "price": "1,299.00",
            "images": [
                "https://img.example.com/1.jpg",
                "https://img.example.com/1.jpg",
                "https://img.example.com/2.jpg"
            ]
        }))
    });
    let importer = ProductImporter::new(model.clone(), TIMEOUT);

    let draft = importer
        .import("https://shop.example.com/item/9")
        .await
        .expect("import");
    assert_eq!(draft.title, "Aurora Smart Lamp");
    assert_eq!(draft.price, Price::from_cents(129_900).expect("price"));
    assert_eq!(draft.images.len(), 2);
    assert_eq!(model.calls(), 1);

    let form = ProductInput::from_draft(draft, Category::SmartHome);
    assert!(form.validate().is_ok());
    assert_eq!(form.category, Category::SmartHome);
    assert_eq!(form.image_urls.len(), 2);
}

#[tokio::test]
async fn test_import_rejects_relative_url_without_model_call() {
    let model = ScriptedModel::new(|_| Ok(json!({})));
    let importer = ProductImporter::new(model.clone(), TIMEOUT);

    let err = importer.import("/item/9").await.expect_err("invalid url");
    assert!(matches!(err, ImportError::InvalidUrl(_)));
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_import_model_failure_is_reported() {
    let model = ScriptedModel::new(|_| Err(ModelError::RateLimited(30)));
    let importer = ProductImporter::new(model, TIMEOUT);

    let err = importer
        .import("https://shop.example.com/item/9")
        .await
        .expect_err("model failed");
    assert!(matches!(err, ImportError::Failed { .. }));
}

#[tokio::test]
async fn test_import_invalid_model_output_is_reported() {
    let model = ScriptedModel::new(|_| Ok(json!({ "title": "Lamp", "price": true })));
    let importer = ProductImporter::new(model, TIMEOUT);

    let err = importer
        .import("https://shop.example.com/item/9")
        .await
        .expect_err("bad price");
    assert!(matches!(err, ImportError::Failed { .. }));
}

#[tokio::test]
async fn test_import_with_disabled_model_fails() {
    let importer = ProductImporter::new(ConfiguredModel::Disabled, TIMEOUT);
    assert!(matches!(
        importer.import("https://shop.example.com/item/9").await,
        Err(ImportError::Failed { .. })
    ));
}

#[tokio::test]
async fn test_suggestions_follow_model_order_and_exclude_viewed() {
    let model = ScriptedModel::new(|_| {
        Ok(json!({ "productIds": ["sky-drone", "echo-buds", "pulse-watch", "ultra-book"] }))
    });
    let suggester = ProductSuggester::new(model, TIMEOUT);
    let request = request_for("echo-buds", &["pulse-watch"], 2);

    let picked = suggester.suggest(&request, &sample_catalog()).await;
    assert_eq!(ids(&picked), vec!["sky-drone", "ultra-book"]);
}

#[tokio::test]
async fn test_suggestions_never_exceed_eligible_pool() {
    let model = ScriptedModel::new(|_| Ok(json!({ "productIds": [] })));
    let suggester = ProductSuggester::new(model, TIMEOUT);
    let pool = vec![
        product("echo-buds", Category::Audio, 12_900),
        product("studio-cans", Category::Audio, 54_900),
        product("sky-drone", Category::Drones, 89_900),
    ];
    let request = request_for("echo-buds", &[], 3);

    let picked = suggester.suggest(&request, &pool).await;
    assert_eq!(ids(&picked), vec!["studio-cans", "sky-drone"]);
}

#[tokio::test]
async fn test_suggestions_fall_back_when_model_fails() {
    let model = ScriptedModel::new(|_| Err(ModelError::Timeout(Duration::from_secs(1))));
    let suggester = ProductSuggester::new(model.clone(), TIMEOUT);
    let request = request_for("sky-drone", &["ultra-book"], 3);

    let picked = suggester.suggest(&request, &sample_catalog()).await;
    assert_eq!(model.calls(), 1);
    assert_eq!(picked.len(), 3);
    assert!(picked.iter().all(|p| p.id.as_str() != "sky-drone"));
    assert!(picked.iter().all(|p| p.id.as_str() != "ultra-book"));
}

#[tokio::test]
async fn test_suggestions_with_unbounded_count_stay_within_pool() {
    let model = ScriptedModel::new(|request| {
        assert!(request.prompt.contains("recommend 3 similar products"));
        Ok(json!({ "productIds": ["ultra-book"] }))
    });
    let suggester = ProductSuggester::new(model, TIMEOUT);
    let request = request_for("sky-drone", &["pulse-watch"], usize::MAX);

    let picked = suggester.suggest(&request, &sample_catalog()).await;
    assert_eq!(ids(&picked), vec!["ultra-book", "echo-buds", "studio-cans"]);
}

#[tokio::test]
async fn test_suggestions_skip_model_when_nothing_eligible() {
    let model = ScriptedModel::new(|_| Ok(json!({ "productIds": ["echo-buds"] })));
    let suggester = ProductSuggester::new(model.clone(), TIMEOUT);
    let pool = vec![product("echo-buds", Category::Audio, 12_900)];
    let request = request_for("echo-buds", &[], 3);

    assert!(suggester.suggest(&request, &pool).await.is_empty());
    assert_eq!(model.calls(), 0);
}
