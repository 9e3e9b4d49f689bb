//! Client sessions: the cart and viewing history as owned state objects.
//!
//! A session wraps a core engine with a [`LocalStorage`](crate::storage::LocalStorage)
//! handle. State is loaded once, every mutation writes the full value back,
//! and storage problems are logged instead of surfacing to the caller.

mod cart;
mod history;

pub use cart::CartSession;
pub use history::HistorySession;

use serde::de::DeserializeOwned;

use crate::storage::LocalStorage;

/// Storage key holding the serialized cart lines.
pub const CART_STORAGE_KEY: &str = "cartItems";
/// Storage key holding the serialized viewing history.
pub const HISTORY_STORAGE_KEY: &str = "viewingHistory";

/// Read and decode `key`, falling back to `T::default()` when the value is
/// absent, unreadable or malformed.
fn load_or_default<S, T>(storage: &S, key: &str) -> T
where
    S: LocalStorage,
    T: DeserializeOwned + Default,
{
    match storage.get_item(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "Discarding unreadable stored value");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read client storage");
            T::default()
        }
    }
}

/// Encode and write `value` under `key`, logging any failure.
fn persist<S, T>(storage: &mut S, key: &str, value: &T)
where
    S: LocalStorage,
    T: serde::Serialize,
{
    let result = serde_json::to_string(value)
        .map_err(|e| e.to_string())
        .and_then(|json| storage.set_item(key, &json).map_err(|e| e.to_string()));

    if let Err(error) = result {
        tracing::warn!(key, %error, "Failed to persist client state");
    }
}
