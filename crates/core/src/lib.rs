//! Tech Pulse Core - shared types and client-side engines.
//!
//! This crate provides the types used across all Tech Pulse components:
//! - `storefront` - JSON API, catalog access and AI pipelines
//! - `cli` - Client session tool (cart, history, checkout) and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure state machines - no I/O, no
//! database access, no HTTP clients. Persistence of the cart and viewing
//! history is done by whoever owns them.
//!
//! # Modules
//!
//! - [`types`] - Product, price, ID and form types
//! - [`cart`] - Cart engine with derived totals
//! - [`history`] - Bounded viewing history
//! - [`catalog`] - Listing filters and sort orders
//! - [`order`] - Simulated checkout summaries

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod history;
pub mod order;
pub mod types;

pub use cart::{Cart, CartError, CartItem, QuantityUpdate};
pub use catalog::{CatalogQuery, PriceFilter, QueryParseError, SortOption};
pub use history::{MAX_HISTORY_LENGTH, ViewingHistory, ViewingHistoryEntry};
pub use order::{CheckoutError, OrderLine, OrderSummary};
pub use types::*;
