//! Type conversion functions for Shopify Storefront API responses.

pub mod checkout;
pub mod products;

pub use checkout::{convert_checkout, convert_user_errors};
pub use products::{convert_product, convert_product_list};

use guitar_shop_core::{CurrencyCode, Money};
use rust_decimal::Decimal;

/// Convert a generated `CurrencyCode` enum to the core currency code.
///
/// Codes outside the trimmed schema deserialize as `Other("XYZ")`.
fn currency_code_from_debug<T: std::fmt::Debug>(code: &T) -> CurrencyCode {
    let raw = format!("{code:?}");
    let code = raw
        .strip_prefix("Other(\"")
        .and_then(|s| s.strip_suffix("\")"))
        .unwrap_or(&raw);
    CurrencyCode::new(code)
}

/// Parse a Shopify decimal amount, logging and zeroing anything malformed.
fn parse_money(amount: &str, currency_code: CurrencyCode) -> Money {
    Money::parse(amount, currency_code.clone()).unwrap_or_else(|e| {
        tracing::warn!(amount = %amount, error = %e, "Unparseable amount from Shopify");
        Money::new(Decimal::ZERO, currency_code)
    })
}
