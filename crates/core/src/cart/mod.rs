//! The cart store.
//!
//! The cart is an ordered list of [`LineItem`]s kept in a single slot of a
//! [`CartStorage`] backend. Every mutation reads the slot, applies the change,
//! and overwrites the slot with the full serialized list. There is no locking:
//! one reader/writer per slot is assumed, and two writers racing on the same
//! slot simply overwrite each other.
//!
//! # Invariants
//!
//! - At most one line item per variant ID.
//! - Every stored line item has `quantity >= 1`; setting a quantity of zero or
//!   less removes the item instead.
//!
//! # Example
//!
//! ```rust
//! use guitar_shop_core::{CartStore, MemoryStorage, cart};
//! # use guitar_shop_core::{CurrencyCode, NewLineItem, ProductId, VariantId};
//! # use rust_decimal::Decimal;
//! # let strat = NewLineItem {
//! #     id: ProductId::new("p1"),
//! #     variant_id: VariantId::new("v1"),
//! #     title: "Stratocaster".to_string(),
//! #     price: Decimal::new(10000, 2),
//! #     currency_code: CurrencyCode::default(),
//! #     image: String::new(),
//! #     handle: "stratocaster".to_string(),
//! # };
//!
//! let store = CartStore::new(MemoryStorage::new());
//! store.add(strat.clone())?;
//! let items = store.add(strat)?;
//!
//! assert_eq!(items.len(), 1);
//! assert_eq!(cart::count(&items), 2);
//! assert_eq!(cart::total(&items), Decimal::new(20000, 2));
//! # Ok::<(), guitar_shop_core::CartError>(())
//! ```

mod events;
mod storage;

pub use events::{CartChange, CartEvent, CartObserver};
pub use storage::{CartStorage, MemoryStorage, NoStorage, StorageError};

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::types::{LineItem, Money, NewLineItem, VariantId};

/// Name of the slot the cart is persisted under.
pub const CART_SLOT: &str = "cart";

/// Errors that can occur when reading or writing the cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// The storage backend failed.
    #[error("cart storage error: {0}")]
    Storage(#[from] StorageError),

    /// The slot holds content that is not a serialized cart.
    #[error("corrupt cart data: {0}")]
    Corrupt(#[source] serde_json::Error),

    /// The cart could not be serialized.
    #[error("failed to serialize cart: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Cart store over an injected persistence backend.
pub struct CartStore<S> {
    storage: S,
    observers: Vec<Box<dyn CartObserver + Send>>,
}

impl<S: CartStorage> CartStore<S> {
    /// Create a store over `storage`.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            observers: Vec::new(),
        }
    }

    /// Register an observer for cart changes.
    pub fn subscribe(&mut self, observer: impl CartObserver + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// The underlying storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the persisted cart.
    ///
    /// Never fails: a missing slot, an unavailable backend, and corrupt
    /// content all read as an empty cart. Corrupt content is logged and left
    /// in place until the next mutation overwrites it.
    #[must_use]
    pub fn load(&self) -> Vec<LineItem> {
        match self.try_load() {
            Ok(items) => items,
            Err(CartError::Storage(StorageError::Unavailable(reason))) => {
                debug!(reason = %reason, "Cart storage unavailable, using empty cart");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read cart, using empty cart");
                Vec::new()
            }
        }
    }

    /// Read the persisted cart, surfacing backend and format errors.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the backend cannot be read and
    /// [`CartError::Corrupt`] if the slot does not hold a serialized cart.
    pub fn try_load(&self) -> Result<Vec<LineItem>, CartError> {
        match self.storage.load(CART_SLOT)? {
            Some(raw) => serde_json::from_str(&raw).map_err(CartError::Corrupt),
            None => Ok(Vec::new()),
        }
    }

    /// Current items for a mutation.
    ///
    /// Corrupt content reads as empty so the write replaces it. A backend
    /// read failure is returned, since saving over an unread slot would
    /// destroy it.
    fn load_for_update(&self) -> Result<Vec<LineItem>, CartError> {
        match self.try_load() {
            Err(CartError::Corrupt(e)) => {
                warn!(error = %e, "Overwriting corrupt cart");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Add one unit of a variant.
    ///
    /// Increments the existing entry for the variant, or appends a new entry
    /// with quantity 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be read or persisted.
    pub fn add(&self, item: NewLineItem) -> Result<Vec<LineItem>, CartError> {
        self.add_quantity(item, 1)
    }

    /// Add `quantity` units of a variant. Adding zero units is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be read or persisted.
    pub fn add_quantity(
        &self,
        item: NewLineItem,
        quantity: u32,
    ) -> Result<Vec<LineItem>, CartError> {
        let mut items = self.load_for_update()?;
        if quantity == 0 {
            return Ok(items);
        }

        let variant_id = item.variant_id.clone();
        let new_quantity = match items.iter_mut().find(|i| i.variant_id == variant_id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(quantity);
                existing.quantity
            }
            None => {
                items.push(item.with_quantity(quantity));
                quantity
            }
        };

        self.save(&items)?;
        self.notify(
            CartChange::Added {
                variant_id,
                quantity: new_quantity,
            },
            &items,
        );
        Ok(items)
    }

    /// Remove a variant from the cart. Removing an absent variant is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be read or persisted.
    pub fn remove(&self, variant_id: &VariantId) -> Result<Vec<LineItem>, CartError> {
        let mut items = self.load_for_update()?;
        let before = items.len();
        items.retain(|i| &i.variant_id != variant_id);

        if items.len() == before {
            return Ok(items);
        }

        self.save(&items)?;
        self.notify(
            CartChange::Removed {
                variant_id: variant_id.clone(),
            },
            &items,
        );
        Ok(items)
    }

    /// Set a variant's quantity.
    ///
    /// A quantity of zero or less removes the variant. An absent variant is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be read or persisted.
    pub fn update_quantity(
        &self,
        variant_id: &VariantId,
        quantity: i64,
    ) -> Result<Vec<LineItem>, CartError> {
        if quantity <= 0 {
            return self.remove(variant_id);
        }

        let mut items = self.load_for_update()?;
        let Some(item) = items.iter_mut().find(|i| &i.variant_id == variant_id) else {
            return Ok(items);
        };

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        item.quantity = quantity;

        self.save(&items)?;
        self.notify(
            CartChange::QuantityChanged {
                variant_id: variant_id.clone(),
                quantity,
            },
            &items,
        );
        Ok(items)
    }

    /// Delete all persisted cart state.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be deleted.
    pub fn clear(&self) -> Result<(), CartError> {
        self.storage.remove(CART_SLOT)?;
        self.notify(CartChange::Cleared, &[]);
        Ok(())
    }

    fn save(&self, items: &[LineItem]) -> Result<(), CartError> {
        let raw = serde_json::to_string(items).map_err(CartError::Serialize)?;
        self.storage.save(CART_SLOT, &raw)?;
        Ok(())
    }

    fn notify(&self, change: CartChange, items: &[LineItem]) {
        let event = CartEvent {
            change,
            item_count: count(items),
        };
        debug!(?event, "Cart changed");

        for observer in &self.observers {
            observer.cart_changed(&event);
        }
    }
}

/// Sum of unit price times quantity over all entries.
///
/// Saturates at `Decimal::MAX` instead of overflowing.
#[must_use]
pub fn total(items: &[LineItem]) -> Decimal {
    items
        .iter()
        .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.amount()))
}

/// Sum of quantities over all entries.
#[must_use]
pub fn count(items: &[LineItem]) -> u32 {
    items
        .iter()
        .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
}

/// Cart total with a display currency.
///
/// Takes the currency of the first entry; an empty cart totals zero in the
/// default currency.
#[must_use]
pub fn subtotal(items: &[LineItem]) -> Money {
    let currency = items
        .first()
        .map(|item| item.currency_code.clone())
        .unwrap_or_default();
    Money::new(total(items), currency)
}
