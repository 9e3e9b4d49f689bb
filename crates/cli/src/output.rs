//! Terminal rendering for command results.

#![allow(clippy::print_stdout)]

use serde::Serialize;
use techpulse_core::{
    Cart, CatalogQuery, ImportedProductDraft, OrderSummary, Product, QuantityUpdate,
    ViewingHistoryEntry,
};
use techpulse_storefront::notify::{Notification, Variant};

pub fn message(text: &str) {
    println!("{text}");
}

pub fn notification(notification: &Notification) {
    let marker = match notification.variant {
        Variant::Default => "✓",
        Variant::Destructive => "✗",
    };
    println!("{marker} {}: {}", notification.title, notification.description);
}

pub fn cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for item in cart.items() {
        println!(
            "{:<24} {:>3} × {:>10} = {:>10}",
            item.product.id.as_str(),
            item.quantity,
            item.product.price.to_string(),
            item.line_total().to_string()
        );
    }
    println!("Items: {}", cart.item_count());
    println!("Subtotal: {}", cart.total());
    println!("Shipping: Free");
    println!("Total: {}", cart.total());
}

pub fn quantity_update(id: &str, outcome: &QuantityUpdate) {
    match outcome {
        QuantityUpdate::Set { previous, quantity } => {
            println!("{id}: quantity {previous} → {quantity}");
        }
        QuantityUpdate::Removed(_) | QuantityUpdate::Missing => {}
    }
}

pub fn order(summary: &OrderSummary) {
    println!("Order {}", summary.order_id);
    for line in &summary.lines {
        println!("  {} × {} = {}", line.title, line.quantity, line.line_total);
    }
    println!("Subtotal: {}", summary.subtotal);
    println!("Shipping: Free");
    println!("Total: {}", summary.total);
}

pub fn product(product: &Product) {
    println!("{} [{}]", product.title, product.category.title());
    match product.original_price {
        Some(original) if product.is_discounted() => {
            println!("{} (was {original})", product.price);
        }
        _ => println!("{}", product.price),
    }
    println!("Rating: {} ({} reviews)", product.rating, product.reviews_count);
    if !product.labels.is_empty() {
        println!("Labels: {}", product.labels.join(", "));
    }
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }
}

/// Heading for a listing page: category, price filter and sort order.
fn listing_heading(query: &CatalogQuery) -> String {
    let category = query.category.map_or("All Products", |c| c.title());
    format!(
        "{category} | Price: {} | {}",
        query.price.label(),
        query.sort.label()
    )
}

pub fn product_list(query: &CatalogQuery, products: &[Product]) {
    println!("{}", listing_heading(query));
    if products.is_empty() {
        println!("No products found.");
        return;
    }
    for product in products {
        println!(
            "{:<24} {:<12} {:>10}  {}",
            product.id.as_str(),
            product.category.key(),
            product.price.to_string(),
            product.title
        );
    }
}

pub fn suggestions(products: &[Product]) {
    if products.is_empty() {
        return;
    }
    println!();
    println!("You might also like:");
    for product in products {
        println!(
            "  {:<24} {:>10}  {}",
            product.id.as_str(),
            product.price.to_string(),
            product.title
        );
    }
}

pub fn history(entries: &[ViewingHistoryEntry]) {
    if entries.is_empty() {
        println!("No recently viewed products.");
        return;
    }
    for entry in entries {
        println!(
            "{:<24} {:>10}  {}",
            entry.id.as_str(),
            entry.price.to_string(),
            entry.title
        );
    }
}

pub fn draft(draft: &ImportedProductDraft) {
    println!("Title: {}", draft.title);
    println!("Price: {}", draft.price);
    println!("Images:");
    for url in &draft.images {
        println!("  {url}");
    }
    println!();
    println!("{}", draft.description);
}

/// Pretty-print `value` as JSON under a heading.
///
/// # Errors
///
/// Returns an error if `value` cannot be serialized.
pub fn json<T: Serialize>(heading: &str, value: &T) -> Result<(), serde_json::Error> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!();
    println!("{heading}:");
    println!("{rendered}");
    Ok(())
}
