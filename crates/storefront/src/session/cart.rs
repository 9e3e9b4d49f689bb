//! Persistent shopping cart session.

use chrono::Utc;
use techpulse_core::{
    Cart, CartError, CartItem, CheckoutError, OrderId, OrderSummary, Price, Product, ProductId,
    QuantityUpdate,
};
use tracing::instrument;

use super::{CART_STORAGE_KEY, load_or_default, persist};
use crate::notify::{Notification, Notifier};
use crate::storage::LocalStorage;

/// A cart bound to client storage and a notification sink.
pub struct CartSession<S, N> {
    cart: Cart,
    storage: S,
    notifier: N,
}

impl<S: LocalStorage, N: Notifier> CartSession<S, N> {
    /// Rehydrate the cart from `storage`.
    ///
    /// A missing or malformed stored value yields an empty cart.
    pub fn load(storage: S, notifier: N) -> Self {
        let cart: Cart = load_or_default(&storage, CART_STORAGE_KEY);
        tracing::debug!(lines = cart.len(), "Cart loaded");
        Self {
            cart,
            storage,
            notifier,
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        self.cart.items()
    }

    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.cart.total()
    }

    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Add one unit of `product` and return the line's quantity.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&mut self, product: Product) -> u32 {
        let title = product.title.clone();
        let quantity = self.cart.add(product);
        self.save();
        self.notifier.notify(Notification::new(
            "Added to Cart",
            format!("{title} has been added to your cart."),
        ));
        quantity
    }

    /// Remove the line for `product_id`.
    ///
    /// Absent ids leave the cart unchanged but still notify and persist.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> Option<CartItem> {
        let removed = self.cart.remove(product_id);
        self.save();
        self.notifier.notify(Notification::destructive(
            "Removed from Cart",
            "Item has been removed from your cart.",
        ));
        removed
    }

    /// Set the quantity of a line. Zero or below removes it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityTooLarge`] if `quantity` exceeds `u32::MAX`.
    #[instrument(skip(self))]
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<QuantityUpdate, CartError> {
        if quantity <= 0 {
            return Ok(self
                .remove_from_cart(product_id)
                .map_or(QuantityUpdate::Missing, QuantityUpdate::Removed));
        }

        let outcome = self.cart.update_quantity(product_id, quantity)?;
        self.save();
        Ok(outcome)
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.save();
    }

    /// Place a simulated order for the current contents and empty the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if there is nothing to buy.
    #[instrument(skip(self))]
    pub fn checkout(&mut self) -> Result<OrderSummary, CheckoutError> {
        let summary = OrderSummary::from_cart(&self.cart, OrderId::generate(), Utc::now())?;
        tracing::info!(
            order_id = %summary.order_id,
            total = %summary.total,
            items = summary.item_count,
            "Order placed"
        );

        self.clear_cart();
        self.notifier.notify(Notification::new(
            "Order Placed!",
            "Thank you for your purchase. A confirmation has been sent to your email.",
        ));
        Ok(summary)
    }

    /// Give back the storage and notifier.
    pub fn into_parts(self) -> (Cart, S, N) {
        (self.cart, self.storage, self.notifier)
    }

    fn save(&mut self) {
        persist(&mut self.storage, CART_STORAGE_KEY, &self.cart);
    }
}
