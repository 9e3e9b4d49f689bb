//! Persistent viewing history session.

use techpulse_core::{Product, ProductId, ViewingHistory, ViewingHistoryEntry};

use super::{HISTORY_STORAGE_KEY, load_or_default, persist};
use crate::storage::LocalStorage;

/// Recently viewed products bound to client storage.
pub struct HistorySession<S> {
    history: ViewingHistory,
    storage: S,
}

impl<S: LocalStorage> HistorySession<S> {
    /// Rehydrate the history, falling back to empty on malformed data.
    pub fn load(storage: S) -> Self {
        let history = load_or_default(&storage, HISTORY_STORAGE_KEY);
        Self { history, storage }
    }

    /// Record a product view and persist.
    pub fn record(&mut self, product: &Product) {
        self.history.record(ViewingHistoryEntry::from(product));
        persist(&mut self.storage, HISTORY_STORAGE_KEY, &self.history);
        tracing::debug!(product_id = %product.id, len = self.history.len(), "Recorded view");
    }

    #[must_use]
    pub const fn history(&self) -> &ViewingHistory {
        &self.history
    }

    #[must_use]
    pub fn entries(&self) -> &[ViewingHistoryEntry] {
        self.history.entries()
    }

    /// History without `id`, as handed to the suggestion pipeline while
    /// `id` is the product on screen.
    #[must_use]
    pub fn excluding(&self, id: &ProductId) -> Vec<ViewingHistoryEntry> {
        self.history.excluding(id)
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}
