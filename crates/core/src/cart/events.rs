//! Cart change notification.
//!
//! The store has no global broadcast. Interested parties register a
//! [`CartObserver`] with the store and are called synchronously, in
//! registration order, after each effective mutation.

use crate::types::VariantId;

/// What changed in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// A variant was added or its quantity incremented.
    Added { variant_id: VariantId, quantity: u32 },
    /// A variant's quantity was set.
    QuantityChanged { variant_id: VariantId, quantity: u32 },
    /// A variant was removed.
    Removed { variant_id: VariantId },
    /// All state was deleted.
    Cleared,
}

/// A cart change plus the resulting unit count, for badges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEvent {
    pub change: CartChange,
    pub item_count: u32,
}

/// Receives cart change notifications.
pub trait CartObserver {
    fn cart_changed(&self, event: &CartEvent);
}

impl<F> CartObserver for F
where
    F: Fn(&CartEvent),
{
    fn cart_changed(&self, event: &CartEvent) {
        self(event);
    }
}
