//! Catalog product types.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Errors raised when a [`Product`] violates a catalog invariant.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// Title is empty or whitespace.
    #[error("product title is required")]
    MissingTitle,
    /// No image descriptors.
    #[error("product must have at least one image")]
    NoImages,
    /// The markdown-from price is lower than the selling price.
    #[error("original price {original} is below price {price}")]
    OriginalBelowPrice {
        /// Selling price.
        price: Price,
        /// Markdown-from price.
        original: Price,
    },
    /// Selling or markdown-from price above [`Price::MAX_LISTED`].
    #[error("price {0} exceeds the largest listable price")]
    PriceTooLarge(Price),
    /// Rating outside of `[0, 5]`.
    #[error("rating must be between 0 and 5 (got {0})")]
    RatingOutOfRange(Decimal),
    /// Unknown category key.
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

/// The fixed set of storefront categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Wearables,
    Audio,
    SmartHome,
    Drones,
    Laptops,
    Cameras,
    Vr,
    Accessories,
}

impl Category {
    /// Every category in navigation order.
    pub const ALL: [Self; 8] = [
        Self::Wearables,
        Self::Audio,
        Self::SmartHome,
        Self::Drones,
        Self::Laptops,
        Self::Cameras,
        Self::Vr,
        Self::Accessories,
    ];

    /// The stable key stored on catalog documents.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Wearables => "wearables",
            Self::Audio => "audio",
            Self::SmartHome => "smart-home",
            Self::Drones => "drones",
            Self::Laptops => "laptops",
            Self::Cameras => "cameras",
            Self::Vr => "vr",
            Self::Accessories => "accessories",
        }
    }

    /// Human-readable title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Wearables => "Wearables",
            Self::Audio => "Audio",
            Self::SmartHome => "Smart Home",
            Self::Drones => "Drones",
            Self::Laptops => "Laptops",
            Self::Cameras => "Cameras",
            Self::Vr => "VR",
            Self::Accessories => "Accessories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = ProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| ProductError::UnknownCategory(s.to_owned()))
    }
}

/// An image attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    /// Absolute image URL.
    pub image_url: String,
    /// Alt text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Short hint used when generating placeholder imagery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_hint: Option<String>,
}

impl ProductImage {
    /// An image with only a URL.
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            image_url: url.into(),
            description: None,
            image_hint: None,
        }
    }
}

/// A catalog product.
///
/// Field names serialize in camelCase to match the catalog documents and the
/// client storage format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub category: Category,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub original_price: Option<Price>,
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub reviews_count: u32,
    #[serde(default)]
    pub rating: Decimal,
    /// Optional product video.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl Product {
    /// Highest allowed rating.
    pub const MAX_RATING: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

    /// Check the catalog invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.title.trim().is_empty() {
            return Err(ProductError::MissingTitle);
        }
        if self.images.is_empty() {
            return Err(ProductError::NoImages);
        }
        if let Some(too_large) = std::iter::once(self.price)
            .chain(self.original_price)
            .find(|p| *p > Price::MAX_LISTED)
        {
            return Err(ProductError::PriceTooLarge(too_large));
        }
        if let Some(original) = self.original_price
            && original < self.price
        {
            return Err(ProductError::OriginalBelowPrice {
                price: self.price,
                original,
            });
        }
        if self.rating < Decimal::ZERO || self.rating > Self::MAX_RATING {
            return Err(ProductError::RatingOutOfRange(self.rating));
        }
        Ok(())
    }

    /// URL of the first image, used as the thumbnail.
    #[must_use]
    pub fn primary_image_url(&self) -> Option<&str> {
        self.images.first().map(|image| image.image_url.as_str())
    }

    /// Whether the product is shown with a markdown-from price.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.original_price.is_some_and(|original| original > self.price)
    }
}

/// Remove duplicate labels while keeping first-seen order.
#[must_use]
pub fn dedup_labels(labels: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for label in labels {
        let label = label.trim().to_owned();
        if !label.is_empty() && !out.contains(&label) {
            out.push(label);
        }
    }
    out
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Build a valid product for tests.
    pub fn product(id: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            category: Category::Audio,
            title: format!("Product {id}"),
            description: String::new(),
            price: Price::from_cents(cents).expect("price"),
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
}
