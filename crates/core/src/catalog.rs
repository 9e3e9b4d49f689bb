//! Catalog listing queries: category filter, price presets and sort order.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Category, Product};

/// Error parsing a query parameter.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct QueryParseError {
    kind: &'static str,
    value: String,
}

/// Price filter presets offered on listing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceFilter {
    #[default]
    All,
    /// 0 to 499.99 inclusive.
    #[serde(rename = "under-500")]
    Under500,
    /// 500 to 999.99 inclusive.
    #[serde(rename = "from-500-to-999")]
    From500To999,
}

impl PriceFilter {
    /// Inclusive bounds, `None` meaning no filtering.
    #[must_use]
    pub fn bounds(self) -> Option<(Decimal, Decimal)> {
        match self {
            Self::All => None,
            Self::Under500 => Some((Decimal::ZERO, Decimal::new(49_999, 2))),
            Self::From500To999 => Some((Decimal::from(500), Decimal::new(99_999, 2))),
        }
    }

    /// Label shown next to the filter.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Under500 => "₹0 - ₹499",
            Self::From500To999 => "₹500 - ₹999",
        }
    }

    #[must_use]
    pub fn matches(self, product: &Product) -> bool {
        self.bounds().is_none_or(|(min, max)| {
            let price = product.price.amount();
            price >= min && price <= max
        })
    }
}

impl FromStr for PriceFilter {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" | "" => Ok(Self::All),
            "under-500" => Ok(Self::Under500),
            "from-500-to-999" => Ok(Self::From500To999),
            other => Err(QueryParseError {
                kind: "price filter",
                value: other.to_owned(),
            }),
        }
    }
}

/// Listing sort orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Catalog order.
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    NameAsc,
    /// Catalog documents carry no creation time; sorts by title descending.
    Newest,
    RatingDesc,
}

impl SortOption {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "Default Sorting Order",
            Self::PriceAsc => "By Price: Low to High",
            Self::PriceDesc => "By Price: High to Low",
            Self::NameAsc => "By Name",
            Self::Newest => "By Newest",
            Self::RatingDesc => "By Avg Review",
        }
    }

    /// Stable-sort `products` in place.
    pub fn sort(self, products: &mut [Product]) {
        match self {
            Self::Default => {}
            Self::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
            Self::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
            Self::NameAsc => products.sort_by(|a, b| a.title.cmp(&b.title)),
            Self::Newest => products.sort_by(|a, b| b.title.cmp(&a.title)),
            Self::RatingDesc => products.sort_by(|a, b| b.rating.cmp(&a.rating)),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            Self::Default => "default",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::NameAsc => "name-asc",
            Self::Newest => "newest",
            Self::RatingDesc => "rating-desc",
        };
        f.write_str(key)
    }
}

impl FromStr for SortOption {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" | "" => Ok(Self::Default),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "name-asc" => Ok(Self::NameAsc),
            "newest" => Ok(Self::Newest),
            "rating-desc" => Ok(Self::RatingDesc),
            other => Err(QueryParseError {
                kind: "sort option",
                value: other.to_owned(),
            }),
        }
    }
}

/// A catalog listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub price: PriceFilter,
    #[serde(default)]
    pub sort: SortOption,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl CatalogQuery {
    /// Whether `product` passes the category and price filters.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.category.is_none_or(|c| c == product.category) && self.price.matches(product)
    }

    /// Filter, sort and truncate an in-memory product list.
    #[must_use]
    pub fn apply(&self, products: impl IntoIterator<Item = Product>) -> Vec<Product> {
        let mut selected: Vec<Product> = products.into_iter().filter(|p| self.matches(p)).collect();
        self.sort.sort(&mut selected);
        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }
        selected
    }
}
