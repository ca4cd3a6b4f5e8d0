//! Guitar Shop Core - Shared types and the cart store.
//!
//! This crate provides the pieces shared by every Guitar Shop front end:
//! - `storefront` - Public-facing web storefront
//! - `cli` - Command-line catalog browser and cart
//!
//! # Architecture
//!
//! The core crate contains only types, traits, and the cart store. It does no
//! network I/O; persistence is injected through [`cart::CartStorage`], so the
//! same store runs against a browser session, a file, or an in-memory fake.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, money, products, line items, catalog lookups
//! - [`cart`] - The cart store, its storage seam, and change observers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{CartError, CartEvent, CartObserver, CartStorage, CartStore, MemoryStorage};
pub use types::*;
