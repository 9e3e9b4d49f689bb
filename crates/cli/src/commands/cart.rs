//! Cart commands backed by client storage.

use techpulse_core::{CartError, CheckoutError, ProductId, QuantityUpdate};
use techpulse_storefront::catalog::{CatalogError, CatalogStore};
use thiserror::Error;

use super::{Context, flush_notifications};
use crate::output;

/// A quantity argument that is not a whole number.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuantityError {
    #[error("quantity must be a whole number (got {0:?})")]
    NotAnInteger(String),
}

/// Parse a quantity argument. Negative values are accepted and remove the
/// line; fractions and other text are rejected.
///
/// # Errors
///
/// Returns [`QuantityError::NotAnInteger`] for anything but an integer.
pub fn parse_quantity(raw: &str) -> Result<i64, QuantityError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| QuantityError::NotAnInteger(raw.to_owned()))
}

pub fn show(ctx: &Context) {
    let session = ctx.cart_session();
    output::cart(session.cart());
}

/// Add one unit of a catalog product.
///
/// # Errors
///
/// Returns an error if the product does not exist or the catalog is
/// unavailable.
pub async fn add(ctx: &Context, id: &str) -> Result<(), CatalogError> {
    let product = ctx.catalog().await?.get(&ProductId::new(id)).await?;

    let mut session = ctx.cart_session();
    let quantity = session.add_to_cart(product);
    tracing::debug!(product_id = id, quantity, "Added to cart");
    flush_notifications(session);
    Ok(())
}

pub fn remove(ctx: &Context, id: &str) {
    let mut session = ctx.cart_session();
    session.remove_from_cart(&ProductId::new(id));
    flush_notifications(session);
}

/// Set the quantity of a line.
///
/// # Errors
///
/// Returns an error if the quantity does not fit in a cart line.
pub fn set(ctx: &Context, id: &str, quantity: i64) -> Result<(), CartError> {
    let mut session = ctx.cart_session();
    let outcome = session.update_quantity(&ProductId::new(id), quantity)?;

    if matches!(outcome, QuantityUpdate::Missing) && quantity > 0 {
        tracing::warn!(product_id = id, "No cart line for product");
    }
    output::quantity_update(id, &outcome);
    flush_notifications(session);
    Ok(())
}

pub fn clear(ctx: &Context) {
    let mut session = ctx.cart_session();
    session.clear_cart();
    output::message("Cart cleared.");
}

/// Place a simulated order.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] if there is nothing to buy.
pub fn checkout(ctx: &Context) -> Result<(), CheckoutError> {
    let mut session = ctx.cart_session();
    let summary = session.checkout()?;
    output::order(&summary);
    flush_notifications(session);
    Ok(())
}
