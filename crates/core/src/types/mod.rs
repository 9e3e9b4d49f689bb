//! Core types for Tech Pulse.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod draft;
pub mod id;
pub mod input;
pub mod price;
pub mod product;

pub use draft::{DraftError, ImportedProductDraft, parse_absolute_url};
pub use id::*;
pub use input::{InputError, ProductInput};
pub use price::{Price, PriceError};
pub use product::{Category, Product, ProductError, ProductImage};
