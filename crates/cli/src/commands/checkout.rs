//! Checkout command.

use std::io::Write;

use guitar_shop_core::{CartStore, Lookup};
use guitar_shop_storefront::catalog::Catalog;

use super::CommandError;
use crate::storage::FileStorage;

/// Create a Shopify checkout for the local cart and print its URL.
///
/// The local cart is left as is; Shopify owns the checkout from here.
///
/// # Errors
///
/// Returns `CommandError::EmptyCart` for an empty cart, or an error if the
/// checkout could not be created.
pub async fn run(
    store: &CartStore<FileStorage>,
    catalog: &dyn Catalog,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let items = store.try_load()?;
    if items.is_empty() {
        return Err(CommandError::EmptyCart);
    }

    match catalog.create_cart_checkout(&items).await {
        Lookup::Found(session) => {
            tracing::info!(checkout_id = %session.id, "Checkout created");
            writeln!(out, "{}", session.web_url)?;
            Ok(())
        }
        Lookup::NotFound => Err(CommandError::EmptyCart),
        Lookup::Transient(detail) => Err(CommandError::Catalog(detail)),
    }
}
