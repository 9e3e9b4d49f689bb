//! Admin product form payload.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::draft::{ImportedProductDraft, parse_absolute_url};
use super::id::ProductId;
use super::price::Price;
use super::product::{Category, Product, ProductImage, dedup_labels};

/// Validation failures for a [`ProductInput`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("title is required")]
    MissingTitle,
    #[error("description is required")]
    MissingDescription,
    #[error("between {min} and {max} images are required (got {got})")]
    ImageCount { min: usize, max: usize, got: usize },
    #[error("{field} must be a valid URL: {value}")]
    InvalidUrl { field: &'static str, value: String },
    #[error("original price {original} is below price {price}")]
    OriginalBelowPrice { price: Price, original: Price },
    #[error("price {0} exceeds the largest listable price")]
    PriceTooLarge(Price),
}

/// Fields an administrator submits to create or edit a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub price: Price,
    #[serde(default)]
    pub original_price: Option<Price>,
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl ProductInput {
    /// Most images the form accepts.
    pub const MAX_IMAGES: usize = 4;

    /// Prefill the form from an imported draft. Extra images past
    /// [`Self::MAX_IMAGES`] are dropped.
    #[must_use]
    pub fn from_draft(draft: ImportedProductDraft, category: Category) -> Self {
        Self {
            title: draft.title,
            description: draft.description,
            category,
            price: draft.price,
            original_price: None,
            image_urls: draft
                .images
                .into_iter()
                .take(Self::MAX_IMAGES)
                .map(String::from)
                .collect(),
            video_url: None,
            labels: Vec::new(),
        }
    }

    /// Check every form rule.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.title.trim().is_empty() {
            return Err(InputError::MissingTitle);
        }
        if self.description.trim().is_empty() {
            return Err(InputError::MissingDescription);
        }

        let got = self.image_urls.len();
        if got == 0 || got > Self::MAX_IMAGES {
            return Err(InputError::ImageCount {
                min: 1,
                max: Self::MAX_IMAGES,
                got,
            });
        }
        for url in &self.image_urls {
            if parse_absolute_url(url).is_none() {
                return Err(InputError::InvalidUrl {
                    field: "imageUrls",
                    value: url.clone(),
                });
            }
        }

        if let Some(video) = self.video_url.as_deref().filter(|v| !v.is_empty())
            && parse_absolute_url(video).is_none()
        {
            return Err(InputError::InvalidUrl {
                field: "videoUrl",
                value: video.to_owned(),
            });
        }

        if let Some(too_large) = std::iter::once(self.price)
            .chain(self.original_price)
            .find(|p| *p > Price::MAX_LISTED)
        {
            return Err(InputError::PriceTooLarge(too_large));
        }
        if let Some(original) = self.original_price
            && original < self.price
        {
            return Err(InputError::OriginalBelowPrice {
                price: self.price,
                original,
            });
        }

        Ok(())
    }

    /// Build a new catalog product with no reviews yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the input fails validation.
    pub fn into_new_product(self, id: ProductId) -> Result<Product, InputError> {
        self.into_product(id, 0, Decimal::ZERO)
    }

    /// Apply the form over an existing product, keeping its identity and
    /// review statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the input fails validation.
    pub fn apply_to(self, existing: &Product) -> Result<Product, InputError> {
        self.into_product(existing.id.clone(), existing.reviews_count, existing.rating)
    }

    fn into_product(
        self,
        id: ProductId,
        reviews_count: u32,
        rating: Decimal,
    ) -> Result<Product, InputError> {
        self.validate()?;

        Ok(Product {
            id,
            category: self.category,
            title: self.title.trim().to_owned(),
            description: self.description.trim().to_owned(),
            price: self.price,
            original_price: self.original_price,
            images: self
                .image_urls
                .into_iter()
                .map(|url| ProductImage::from_url(url.trim()))
                .collect(),
            labels: dedup_labels(self.labels),
            reviews_count,
            rating,
            video_url: self.video_url.filter(|v| !v.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ProductInput {
        ProductInput {
            title: "Pulse Buds".to_string(),
            description: "Wireless earbuds".to_string(),
            category: Category::Audio,
            price: Price::from_cents(4999).expect("price"),
            original_price: Some(Price::from_cents(6999).expect("price")),
            image_urls: vec!["https://cdn.techpulse.com/buds.jpg".to_string()],
            video_url: Some(String::new()),
            labels: vec!["New".to_string(), "New".to_string()],
        }
    }

    #[test]
    fn test_valid_input_builds_product() {
        let product = input()
            .into_new_product(ProductId::new("buds"))
            .expect("valid");
        assert_eq!(product.labels, vec!["New".to_string()]);
        assert_eq!(product.reviews_count, 0);
        assert!(product.video_url.is_none());
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_image_count_limits() {
        let mut form = input();
        form.image_urls.clear();
        assert!(matches!(
            form.validate(),
            Err(InputError::ImageCount { got: 0, .. })
        ));

        form.image_urls = (0..5)
            .map(|i| format!("https://cdn.techpulse.com/{i}.jpg"))
            .collect();
        assert!(matches!(
            form.validate(),
            Err(InputError::ImageCount { got: 5, .. })
        ));
    }

    #[test]
    fn test_rejects_original_below_price() {
        let mut form = input();
        form.original_price = Some(Price::from_cents(100).expect("price"));
        assert!(matches!(
            form.validate(),
            Err(InputError::OriginalBelowPrice { .. })
        ));
    }

    #[test]
    fn test_rejects_unlistable_price() {
        let mut form = input();
        form.original_price = Some(Price::new(rust_decimal::Decimal::MAX).expect("price"));
        assert!(matches!(
            form.validate(),
            Err(InputError::PriceTooLarge(_))
        ));

        form.original_price = None;
        form.price = Price::new(rust_decimal::Decimal::MAX).expect("price");
        assert!(matches!(
            form.validate(),
            Err(InputError::PriceTooLarge(_))
        ));
    }

    #[test]
    fn test_rejects_bad_video_url() {
        let mut form = input();
        form.video_url = Some("not a url".to_string());
        assert!(matches!(
            form.validate(),
            Err(InputError::InvalidUrl {
                field: "videoUrl",
                ..
            })
        ));
    }

    #[test]
    fn test_from_draft_caps_images() {
        let draft = ImportedProductDraft::from_value(serde_json::json!({
            "title": "Drone",
            "description": "Flies",
            "price": 300,
            "images": (0..6)
                .map(|i| format!("https://shop.example.com/{i}.jpg"))
                .collect::<Vec<_>>()
        }))
        .expect("draft");

        let form = ProductInput::from_draft(draft, Category::Drones);
        assert_eq!(form.image_urls.len(), ProductInput::MAX_IMAGES);
        assert_eq!(form.image_urls[0], "https://shop.example.com/0.jpg");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_apply_to_keeps_reviews() {
        let mut existing = input()
            .into_new_product(ProductId::new("buds"))
            .expect("valid");
        existing.reviews_count = 42;
        existing.rating = Decimal::new(45, 1);

        let mut edit = input();
        edit.title = "Pulse Buds 2".to_string();
        let updated = edit.apply_to(&existing).expect("valid");

        assert_eq!(updated.id, existing.id);
        assert_eq!(updated.reviews_count, 42);
        assert_eq!(updated.title, "Pulse Buds 2");
    }
}
