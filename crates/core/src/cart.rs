//! Shopping cart engine.
//!
//! A [`Cart`] is an ordered list of [`CartItem`]s with at most one item per
//! product id. All operations are pure state transitions; persistence and
//! user notifications live with the session that owns the cart.
//!
//! Totals are derived on every read rather than cached.

use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, ProductId};

/// Errors from cart operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The requested quantity does not fit in a cart line.
    #[error("quantity {0} is too large")]
    QuantityTooLarge(i64),
}

/// A product snapshot paired with a positive quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// `price × quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Outcome of [`Cart::update_quantity`].
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityUpdate {
    /// Quantity replaced on an existing line.
    Set { previous: u32, quantity: u32 },
    /// A non-positive quantity removed the line.
    Removed(CartItem),
    /// No line for that product id.
    Missing,
}

/// Ordered cart contents.
///
/// Serializes as a bare JSON array of `{ product, quantity }` objects.
/// Deserialization normalizes the list: zero quantities are dropped and
/// repeated product ids are merged into the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from arbitrary items, restoring the cart invariants.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.quantity == 0 {
                continue;
            }
            match cart.position(&item.product.id) {
                Some(idx) => {
                    if let Some(existing) = cart.items.get_mut(idx) {
                        existing.quantity = existing.quantity.saturating_add(item.quantity);
                    }
                }
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// The line for `product_id`, if any.
    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.product.id == product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Add one unit of `product`, returning the line's new quantity.
    ///
    /// An existing line keeps its original product snapshot.
    pub fn add(&mut self, product: Product) -> u32 {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product.id == product.id)
        {
            item.quantity = item.quantity.saturating_add(1);
            return item.quantity;
        }

        self.items.push(CartItem {
            product,
            quantity: 1,
        });
        1
    }

    /// Remove the line for `product_id`. Absent ids are a no-op.
    pub fn remove(&mut self, product_id: &ProductId) -> Option<CartItem> {
        self.position(product_id).map(|idx| self.items.remove(idx))
    }

    /// Set a line's quantity. Zero or negative quantities remove the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityTooLarge`] if `quantity` exceeds `u32::MAX`.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<QuantityUpdate, CartError> {
        if quantity <= 0 {
            return Ok(self
                .remove(product_id)
                .map_or(QuantityUpdate::Missing, QuantityUpdate::Removed));
        }

        let quantity = u32::try_from(quantity).map_err(|_| CartError::QuantityTooLarge(quantity))?;

        Ok(
            match self
                .items
                .iter_mut()
                .find(|item| &item.product.id == product_id)
            {
                Some(item) => {
                    let previous = item.quantity;
                    item.quantity = quantity;
                    QuantityUpdate::Set { previous, quantity }
                }
                None => QuantityUpdate::Missing,
            },
        )
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `price × quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| &item.product.id == product_id)
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}
