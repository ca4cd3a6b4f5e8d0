//! Input types for Shopify Storefront API mutations.
//!
//! Read types (products, checkout sessions) live in `guitar_shop_core`.

use guitar_shop_core::{LineItem, VariantId};

/// A line to send when creating a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLineInput {
    /// Variant being purchased.
    pub merchandise_id: VariantId,
    pub quantity: u32,
}

impl From<&LineItem> for CheckoutLineInput {
    fn from(item: &LineItem) -> Self {
        Self {
            merchandise_id: item.variant_id.clone(),
            quantity: item.quantity,
        }
    }
}
