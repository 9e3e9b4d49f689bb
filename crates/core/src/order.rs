//! Simulated checkout results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::types::{OrderId, Price, ProductId};

/// Checkout failures.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("cannot check out an empty cart")]
    EmptyCart,
}

/// A purchased line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub title: String,
    pub unit_price: Price,
    pub quantity: u32,
    pub line_total: Price,
}

/// Totals and lines of a placed order. Payment is not processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub lines: Vec<OrderLine>,
    pub subtotal: Price,
    /// Shipping is always free.
    pub shipping: Price,
    pub total: Price,
    pub item_count: u64,
    pub placed_at: DateTime<Utc>,
}

impl OrderSummary {
    /// Summarize `cart` as a placed order.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart has no lines.
    pub fn from_cart(
        cart: &Cart,
        order_id: OrderId,
        placed_at: DateTime<Utc>,
    ) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let lines = cart
            .items()
            .iter()
            .map(|item| OrderLine {
                product_id: item.product.id.clone(),
                title: item.product.title.clone(),
                unit_price: item.product.price,
                quantity: item.quantity,
                line_total: item.line_total(),
            })
            .collect();

        let subtotal = cart.total();
        let shipping = Price::ZERO;

        Ok(Self {
            order_id,
            lines,
            subtotal,
            shipping,
            total: subtotal + shipping,
            item_count: cart.item_count(),
            placed_at,
        })
    }
}
