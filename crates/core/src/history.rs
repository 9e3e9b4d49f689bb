//! Recently viewed products.
//!
//! The history keeps at most [`MAX_HISTORY_LENGTH`] distinct products,
//! most recent first. It feeds the suggestion pipeline and is persisted in
//! client storage next to the cart.

use serde::{Deserialize, Serialize};

use crate::types::{Category, Price, Product, ProductId};

/// Upper bound on remembered products.
pub const MAX_HISTORY_LENGTH: usize = 5;

/// Reduced product projection kept in the viewing history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewingHistoryEntry {
    pub id: ProductId,
    pub category: Category,
    pub title: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub original_price: Option<Price>,
    pub price: Price,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub reviews_count: u32,
}

impl From<&Product> for ViewingHistoryEntry {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            category: product.category,
            title: product.title.clone(),
            image_url: product.primary_image_url().unwrap_or_default().to_owned(),
            original_price: product.original_price,
            price: product.price,
            labels: product.labels.clone(),
            reviews_count: product.reviews_count,
        }
    }
}

/// Bounded, de-duplicated, most-recent-first list of viewed products.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ViewingHistoryEntry>", into = "Vec<ViewingHistoryEntry>")]
pub struct ViewingHistory {
    entries: Vec<ViewingHistoryEntry>,
}

impl ViewingHistory {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Move `entry` to the front, dropping any older entry with the same id
    /// and anything past the length bound.
    pub fn record(&mut self, entry: ViewingHistoryEntry) {
        self.entries.retain(|existing| existing.id != entry.id);
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_HISTORY_LENGTH);
    }

    /// Entries, most recent first.
    #[must_use]
    pub fn entries(&self) -> &[ViewingHistoryEntry] {
        &self.entries
    }

    /// Entries other than `id`, most recent first.
    #[must_use]
    pub fn excluding(&self, id: &ProductId) -> Vec<ViewingHistoryEntry> {
        self.entries
            .iter()
            .filter(|entry| &entry.id != id)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.entries.iter().any(|entry| &entry.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl From<Vec<ViewingHistoryEntry>> for ViewingHistory {
    /// Keeps the first occurrence of each id and the first
    /// [`MAX_HISTORY_LENGTH`] survivors.
    fn from(entries: Vec<ViewingHistoryEntry>) -> Self {
        let mut kept: Vec<ViewingHistoryEntry> = Vec::with_capacity(MAX_HISTORY_LENGTH);
        for entry in entries {
            if kept.len() == MAX_HISTORY_LENGTH {
                break;
            }
            if !kept.iter().any(|existing| existing.id == entry.id) {
                kept.push(entry);
            }
        }
        Self { entries: kept }
    }
}

impl From<ViewingHistory> for Vec<ViewingHistoryEntry> {
    fn from(history: ViewingHistory) -> Self {
        history.entries
    }
}
