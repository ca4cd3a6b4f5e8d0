//! Command implementations.
//!
//! Output goes through a `Write` so rendering can be tested without a
//! terminal.

pub mod cart;
pub mod catalog;
pub mod checkout;

use guitar_shop_core::CartError;
use guitar_shop_storefront::config::ConfigError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Shopify settings are missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The cart file could not be read or written.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// No product has this handle.
    #[error("No product with handle '{0}'")]
    ProductNotFound(String),

    /// The variant does not belong to the product.
    #[error("Product '{handle}' has no variant '{variant}'")]
    UnknownVariant { handle: String, variant: String },

    /// No variant of the product is in stock.
    #[error("Product '{0}' is sold out")]
    NoVariants(String),

    /// The requested variant is out of stock.
    #[error("Variant '{variant}' of '{handle}' is sold out")]
    SoldOut { handle: String, variant: String },

    /// The catalog could not be reached.
    #[error("Catalog unavailable: {0}")]
    Catalog(String),

    /// Checkout was requested for an empty cart.
    #[error("The cart is empty")]
    EmptyCart,
}
