//! Local cart commands.

use std::io::Write;

use guitar_shop_core::cart::{count, subtotal};
use guitar_shop_core::{CartEvent, CartStore, LineItem, Lookup, NewLineItem, Product, VariantId};
use guitar_shop_storefront::catalog::Catalog;

use super::CommandError;
use crate::storage::FileStorage;

/// Open the cart with a logging observer attached.
pub fn open(storage: FileStorage) -> CartStore<FileStorage> {
    let mut store = CartStore::new(storage);
    store.subscribe(|event: &CartEvent| {
        tracing::info!(change = ?event.change, item_count = event.item_count, "Cart updated");
    });
    store
}

/// Print the cart.
///
/// # Errors
///
/// Returns an error if the cart file is unreadable or output fails.
pub fn show(store: &CartStore<FileStorage>, out: &mut impl Write) -> Result<(), CommandError> {
    let items = store.try_load()?;
    render_cart(out, &items)?;
    Ok(())
}

/// Add one unit of a product variant.
///
/// Without `variant`, the product's first in-stock variant is used.
///
/// # Errors
///
/// Returns an error if the product or variant does not exist, the catalog
/// is unavailable, or the cart cannot be written.
pub async fn add(
    store: &CartStore<FileStorage>,
    catalog: &dyn Catalog,
    handle: &str,
    variant: Option<&str>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let product = match catalog.get_product(handle).await {
        Lookup::Found(product) => product,
        Lookup::NotFound => return Err(CommandError::ProductNotFound(handle.to_string())),
        Lookup::Transient(detail) => return Err(CommandError::Catalog(detail)),
    };

    let item = line_item_for(&product, variant)?;

    let items = store.add(item)?;
    render_cart(out, &items)?;
    Ok(())
}

/// Cart entry for `variant` of `product`, or its first in-stock variant.
///
/// # Errors
///
/// Returns an error if the variant is not part of the product or cannot be
/// bought.
pub fn line_item_for(
    product: &Product,
    variant: Option<&str>,
) -> Result<NewLineItem, CommandError> {
    let handle = || product.handle.clone();

    let chosen = match variant {
        Some(id) => product
            .variant(&VariantId::new(id))
            .ok_or_else(|| CommandError::UnknownVariant {
                handle: handle(),
                variant: id.to_string(),
            })?,
        None => product
            .first_available_variant()
            .ok_or_else(|| CommandError::NoVariants(handle()))?,
    };

    if !chosen.available_for_sale {
        return Err(CommandError::SoldOut {
            handle: handle(),
            variant: chosen.id.to_string(),
        });
    }

    product
        .line_item(&chosen.id)
        .ok_or_else(|| CommandError::NoVariants(handle()))
}

/// Remove a variant.
///
/// # Errors
///
/// Returns an error if the cart cannot be written or output fails.
pub fn remove(
    store: &CartStore<FileStorage>,
    variant: &str,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let items = store.remove(&VariantId::new(variant))?;
    render_cart(out, &items)?;
    Ok(())
}

/// Set a variant's quantity. Zero or less removes it.
///
/// # Errors
///
/// Returns an error if the cart cannot be written or output fails.
pub fn set(
    store: &CartStore<FileStorage>,
    variant: &str,
    quantity: i64,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let items = store.update_quantity(&VariantId::new(variant), quantity)?;
    render_cart(out, &items)?;
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the cart file cannot be deleted or output fails.
pub fn clear(store: &CartStore<FileStorage>, out: &mut impl Write) -> Result<(), CommandError> {
    store.clear()?;
    writeln!(out, "Cart cleared.")?;
    Ok(())
}

pub fn render_cart(out: &mut impl Write, items: &[LineItem]) -> std::io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "Your cart is empty.");
    }

    for item in items {
        writeln!(
            out,
            "{:>3} x {:<40} {:>12}  {}",
            item.quantity,
            item.title,
            item.line_total().display(),
            item.variant_id
        )?;
    }
    writeln!(
        out,
        "Total ({} items): {}",
        count(items),
        subtotal(items).display()
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use guitar_shop_core::{CurrencyCode, Money, PriceRange, ProductId, ProductVariant};
    use rust_decimal::Decimal;

    use super::*;

    fn line(variant: &str, cents: i64, quantity: u32) -> LineItem {
        LineItem {
            id: ProductId::new("gid://shopify/Product/5"),
            variant_id: VariantId::new(variant),
            title: "Mustang".to_string(),
            price: Decimal::new(cents, 2),
            currency_code: CurrencyCode::default(),
            quantity,
            image: String::new(),
            handle: "mustang".to_string(),
        }
    }

    #[test]
    fn test_render_empty_cart() {
        let mut out = Vec::new();
        render_cart(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Your cart is empty.\n");
    }

    #[test]
    fn test_render_cart_total() {
        let mut out = Vec::new();
        render_cart(&mut out, &[line("v1", 10_000, 2), line("v2", 5_000, 1)]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("  2 x Mustang"));
        assert!(text.ends_with("Total (3 items): $250.00\n"));
    }

    fn mustang() -> Product {
        let variant = |id: &str, available: bool| ProductVariant {
            id: VariantId::new(id),
            title: id.to_string(),
            price: Money::new(Decimal::new(69_900, 2), CurrencyCode::default()),
            available_for_sale: available,
        };

        Product {
            id: ProductId::new("gid://shopify/Product/5"),
            title: "Mustang".to_string(),
            description: String::new(),
            handle: "mustang".to_string(),
            price_range: PriceRange {
                min_variant_price: Money::new(Decimal::new(69_900, 2), CurrencyCode::default()),
            },
            images: Vec::new(),
            variants: vec![variant("sold-out", false), variant("in-stock", true)],
        }
    }

    #[test]
    fn test_line_item_for_defaults_to_first_in_stock_variant() {
        let item = line_item_for(&mustang(), None).unwrap();
        assert_eq!(item.variant_id.as_str(), "in-stock");
    }

    #[test]
    fn test_line_item_for_rejects_sold_out_variant() {
        assert!(matches!(
            line_item_for(&mustang(), Some("sold-out")),
            Err(CommandError::SoldOut { .. })
        ));
    }

    #[test]
    fn test_line_item_for_rejects_foreign_variant() {
        assert!(matches!(
            line_item_for(&mustang(), Some("gid://shopify/ProductVariant/999")),
            Err(CommandError::UnknownVariant { .. })
        ));
    }

    #[test]
    fn test_line_item_for_sold_out_product() {
        let mut product = mustang();
        product.variants.truncate(1);
        assert!(matches!(
            line_item_for(&product, None),
            Err(CommandError::NoVariants(_))
        ));
    }

    #[test]
    fn test_render_cart_with_oversized_price() {
        let mut huge = line("v1", 0, 2);
        huge.price = Decimal::MAX;

        let mut out = Vec::new();
        render_cart(&mut out, &[huge]).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Total (2 items)"));
    }
}
