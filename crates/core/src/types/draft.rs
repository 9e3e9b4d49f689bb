//! Product drafts produced by the URL import pipeline.
//!
//! A draft is never trusted as-is: model output arrives as raw JSON and is
//! only turned into an [`ImportedProductDraft`] after every field passes
//! validation. Nothing is partially applied.

use serde::{Deserialize, Serialize};
use url::Url;

use super::price::{Price, PriceError};

/// Reasons a draft fails validation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// The JSON does not have the draft shape.
    #[error("draft does not match schema: {0}")]
    Schema(String),
    /// Title missing or blank.
    #[error("draft title is empty")]
    EmptyTitle,
    /// Price could not be read as a plain number.
    #[error("draft price is invalid: {0}")]
    Price(#[from] PriceError),
    /// Price field is neither a number nor a string.
    #[error("draft price must be a number")]
    PriceType,
    /// An image entry is not an absolute http(s) URL.
    #[error("draft image is not an absolute URL: {0}")]
    ImageUrl(String),
}

/// Structured product data extracted from a product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedProductDraft {
    pub title: String,
    /// Plain-text description.
    pub description: String,
    pub price: Price,
    /// Absolute image URLs in page order, without duplicates.
    pub images: Vec<Url>,
}

/// Draft shape as emitted by the model, before validation.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDraft {
    title: String,
    #[serde(default)]
    description: String,
    price: serde_json::Value,
    #[serde(default)]
    images: Vec<String>,
}

impl ImportedProductDraft {
    /// Number of images the importer asks for when the page has them.
    pub const TARGET_IMAGE_COUNT: usize = 3;

    /// Validate raw model output into a draft.
    ///
    /// # Errors
    ///
    /// Returns a [`DraftError`] describing the first field that failed.
    pub fn from_value(value: serde_json::Value) -> Result<Self, DraftError> {
        let raw: RawDraft =
            serde_json::from_value(value).map_err(|e| DraftError::Schema(e.to_string()))?;

        let title = raw.title.trim().to_owned();
        if title.is_empty() {
            return Err(DraftError::EmptyTitle);
        }

        let price = match &raw.price {
            serde_json::Value::Number(n) => Price::parse_number(&n.to_string())?,
            serde_json::Value::String(s) => Price::parse_text(s)?,
            _ => return Err(DraftError::PriceType),
        };

        let mut images: Vec<Url> = Vec::with_capacity(raw.images.len());
        for candidate in raw.images {
            let url = parse_absolute_url(&candidate)
                .ok_or_else(|| DraftError::ImageUrl(candidate.clone()))?;
            if !images.contains(&url) {
                images.push(url);
            }
        }

        Ok(Self {
            title,
            description: raw.description.trim().to_owned(),
            price,
            images,
        })
    }

    /// JSON schema the model must satisfy, used as the structured-output
    /// tool's input schema.
    #[must_use]
    pub fn json_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": "The extracted product title."
                },
                "description": {
                    "type": "string",
                    "description": "The extracted product description, cleaned of any HTML or scripts."
                },
                "price": {
                    "type": "number",
                    "description": "The extracted product price as a number, without currency symbols or thousands separators."
                },
                "images": {
                    "type": "array",
                    "items": { "type": "string", "format": "uri" },
                    "description": "A list of extracted product image URLs. Should be at least 3 images if available."
                }
            },
            "required": ["title", "description", "price", "images"],
            "additionalProperties": false
        })
    }
}

/// Parse `input` as an absolute `http` or `https` URL.
#[must_use]
pub fn parse_absolute_url(input: &str) -> Option<Url> {
    Url::parse(input.trim())
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_valid_draft() {
        let draft = ImportedProductDraft::from_value(json!({
            "title": "  Aurora Headphones ",
            "description": "Noise cancelling.",
            "price": 1299.5,
            "images": [
                "https://shop.example.com/a.jpg",
                "https://shop.example.com/b.jpg",
                "https://shop.example.com/a.jpg"
            ]
        }))
        .expect("valid draft");

        assert_eq!(draft.title, "Aurora Headphones");
        assert_eq!(draft.price.amount(), Decimal::new(12995, 1));
        assert_eq!(draft.images.len(), 2);
    }

    #[test]
    fn test_string_price_is_cleaned() {
        let draft = ImportedProductDraft::from_value(json!({
            "title": "Widget",
            "description": "",
            "price": "$1,049.00",
            "images": []
        }))
        .expect("valid draft");
        assert_eq!(draft.price.amount(), Decimal::new(104_900, 2));
    }

    #[test]
    fn test_rupee_prefix_keeps_full_amount() {
        let draft = ImportedProductDraft::from_value(json!({
            "title": "Widget",
            "description": "",
            "price": "Rs. 1,299",
            "images": []
        }))
        .expect("valid draft");
        assert_eq!(draft.price.amount(), Decimal::from(1299));
    }

    #[test]
    fn test_exponent_number_is_not_misread() {
        let draft = |price: serde_json::Value| {
            ImportedProductDraft::from_value(json!({
                "title": "Widget",
                "description": "",
                "price": price,
                "images": []
            }))
        };

        assert_eq!(
            draft(json!(1.5e16)),
            Err(DraftError::Price(PriceError::TooLarge(Decimal::from(
                15_000_000_000_000_000_i64
            ))))
        );
        assert_eq!(
            draft(json!(1e-7)).expect("tiny price").price.amount(),
            Decimal::new(1, 7)
        );
    }

    #[test]
    fn test_rejects_schema_mismatch() {
        let err = ImportedProductDraft::from_value(json!({ "name": "Widget" }))
            .expect_err("should fail");
        assert!(matches!(err, DraftError::Schema(_)));
    }

    #[test]
    fn test_rejects_bad_fields() {
        let base = |price: serde_json::Value, image: &str| {
            json!({
                "title": "Widget",
                "description": "d",
                "price": price,
                "images": [image]
            })
        };

        assert!(matches!(
            ImportedProductDraft::from_value(base(json!("call us"), "https://a.com/x.jpg")),
            Err(DraftError::Price(_))
        ));
        assert!(matches!(
            ImportedProductDraft::from_value(base(json!(-3), "https://a.com/x.jpg")),
            Err(DraftError::Price(PriceError::Negative(_)))
        ));
        assert_eq!(
            ImportedProductDraft::from_value(base(json!(true), "https://a.com/x.jpg")),
            Err(DraftError::PriceType)
        );
        assert!(matches!(
            ImportedProductDraft::from_value(base(json!(10), "/relative.jpg")),
            Err(DraftError::ImageUrl(_))
        ));
        assert_eq!(
            ImportedProductDraft::from_value(json!({
                "title": " ",
                "description": "d",
                "price": 1,
                "images": []
            })),
            Err(DraftError::EmptyTitle)
        );
    }

    #[test]
    fn test_parse_absolute_url() {
        assert!(parse_absolute_url("https://example.com/p/1").is_some());
        assert!(parse_absolute_url("ftp://example.com/file").is_none());
        assert!(parse_absolute_url("example.com").is_none());
        assert!(parse_absolute_url("mailto:someone@example.com").is_none());
    }
}
