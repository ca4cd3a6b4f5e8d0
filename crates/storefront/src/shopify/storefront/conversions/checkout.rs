//! Checkout conversion functions.

use guitar_shop_core::{CheckoutId, CheckoutSession};

use super::super::queries::create_checkout;

pub fn convert_checkout(cart: create_checkout::CreateCheckoutCartCreateCart) -> CheckoutSession {
    CheckoutSession {
        id: CheckoutId::new(cart.id),
        web_url: cart.checkout_url,
        total_quantity: u32::try_from(cart.total_quantity).unwrap_or(0),
    }
}

/// Join user errors into one message, prefixing each with its field path.
pub fn convert_user_errors(
    errors: Vec<create_checkout::CreateCheckoutCartCreateUserErrors>,
) -> String {
    errors
        .into_iter()
        .map(|e| match e.field {
            Some(field) if !field.is_empty() => format!("{}: {}", field.join("."), e.message),
            _ => e.message,
        })
        .collect::<Vec<_>>()
        .join("; ")
}
