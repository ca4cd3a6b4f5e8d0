//! Core types for Guitar Shop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod checkout;
pub mod id;
pub mod line_item;
pub mod lookup;
pub mod money;
pub mod product;

pub use checkout::CheckoutSession;
pub use id::*;
pub use line_item::{LineItem, NewLineItem};
pub use lookup::Lookup;
pub use money::{CurrencyCode, Money};
pub use product::{Image, PriceRange, Product, ProductVariant};
