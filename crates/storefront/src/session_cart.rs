//! Cart persistence for browser sessions.
//!
//! The session slot is read once per request into a [`MemoryStorage`], the
//! synchronous [`CartStore`] works against that, and [`SessionCart::flush`]
//! writes the slot back only if something changed.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::http::HeaderValue;
use axum::response::{IntoResponseParts, ResponseParts};
use guitar_shop_core::cart::CART_SLOT;
use guitar_shop_core::{CartError, CartEvent, CartObserver, CartStore, LineItem, MemoryStorage};
use tower_sessions::Session;

use crate::error::AppError;

/// HTMX event fired when the cart changes.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Cart observer that turns changes into an `HX-Trigger` response header.
#[derive(Debug, Clone, Default)]
pub struct HxTrigger(Arc<AtomicBool>);

impl HxTrigger {
    /// Whether any cart change was observed.
    #[must_use]
    pub fn fired(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl CartObserver for HxTrigger {
    fn cart_changed(&self, event: &CartEvent) {
        tracing::debug!(change = ?event.change, item_count = event.item_count, "Cart changed");
        self.0.store(true, Ordering::Relaxed);
    }
}

impl IntoResponseParts for HxTrigger {
    type Error = std::convert::Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if self.fired() {
            res.headers_mut()
                .insert("HX-Trigger", HeaderValue::from_static(CART_UPDATED_EVENT));
        }
        Ok(res)
    }
}

/// A request-scoped cart backed by the session.
pub struct SessionCart {
    session: Session,
    storage: MemoryStorage,
    trigger: HxTrigger,
}

impl SessionCart {
    /// Read the cart slot out of the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn load(session: Session) -> Result<Self, AppError> {
        let raw = session.get::<String>(CART_SLOT).await?;
        let storage = raw.map_or_else(MemoryStorage::new, |value| {
            MemoryStorage::with_slot(CART_SLOT, value)
        });

        Ok(Self {
            session,
            storage,
            trigger: HxTrigger::default(),
        })
    }

    /// Current cart contents. Corrupt slots read as empty.
    #[must_use]
    pub fn items(&self) -> Vec<LineItem> {
        CartStore::new(&self.storage).load()
    }

    /// Run a cart mutation with the HTMX observer attached.
    ///
    /// # Errors
    ///
    /// Returns whatever error the mutation returns.
    pub fn mutate<T>(
        &self,
        op: impl FnOnce(&CartStore<&MemoryStorage>) -> Result<T, CartError>,
    ) -> Result<T, CartError> {
        let mut store = CartStore::new(&self.storage);
        store.subscribe(self.trigger.clone());
        op(&store)
    }

    /// Write the slot back to the session if a mutation touched it.
    ///
    /// Returns the trigger so handlers can attach it to their response.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be written.
    pub async fn flush(self) -> Result<HxTrigger, AppError> {
        if self.storage.is_dirty() {
            match self.storage.get(CART_SLOT) {
                Some(value) => self.session.insert(CART_SLOT, value).await?,
                None => {
                    self.session.remove::<String>(CART_SLOT).await?;
                }
            }
        }
        Ok(self.trigger)
    }
}
