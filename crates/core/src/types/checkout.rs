//! Checkout session returned by the commerce platform.

use serde::{Deserialize, Serialize};

use super::id::CheckoutId;

/// An externally-managed transaction collecting line items for payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub id: CheckoutId,
    /// Hosted checkout page to redirect the buyer to.
    pub web_url: String,
    /// Units the platform accepted into the session.
    pub total_quantity: u32,
}
