//! Catalog browsing commands.

use std::io::Write;

use guitar_shop_core::{Lookup, Product};
use guitar_shop_storefront::catalog::Catalog;

use super::CommandError;

/// List products in catalog order.
///
/// # Errors
///
/// Returns an error if the catalog is unavailable or output fails.
pub async fn products(
    catalog: &dyn Catalog,
    limit: i64,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    match catalog.list_products(limit).await {
        Lookup::Found(products) => render_products(out, &products)?,
        Lookup::NotFound => render_products(out, &[])?,
        Lookup::Transient(detail) => return Err(CommandError::Catalog(detail)),
    }
    Ok(())
}

/// Show one product with its variants.
///
/// # Errors
///
/// Returns an error if the product does not exist, the catalog is
/// unavailable, or output fails.
pub async fn product(
    catalog: &dyn Catalog,
    handle: &str,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    match catalog.get_product(handle).await {
        Lookup::Found(product) => render_product(out, &product)?,
        Lookup::NotFound => return Err(CommandError::ProductNotFound(handle.to_string())),
        Lookup::Transient(detail) => return Err(CommandError::Catalog(detail)),
    }
    Ok(())
}

pub fn render_products(out: &mut impl Write, products: &[Product]) -> std::io::Result<()> {
    if products.is_empty() {
        return writeln!(out, "No products found.");
    }

    for product in products {
        writeln!(
            out,
            "{:<32} {:<40} {:>12}",
            product.handle,
            product.title,
            product.price_range.min_variant_price.display()
        )?;
    }
    Ok(())
}

pub fn render_product(out: &mut impl Write, product: &Product) -> std::io::Result<()> {
    writeln!(out, "{}", product.title)?;
    writeln!(out, "handle: {}", product.handle)?;
    if !product.description.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", product.description)?;
    }

    writeln!(out)?;
    writeln!(out, "Variants:")?;
    for variant in &product.variants {
        let availability = if variant.available_for_sale {
            ""
        } else {
            " (sold out)"
        };
        writeln!(
            out,
            "  {:<40} {:>12}  {}{}",
            variant.title,
            variant.price.display(),
            variant.id,
            availability
        )?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use guitar_shop_core::{Money, PriceRange, ProductId, ProductVariant, VariantId};
    use rust_decimal::Decimal;

    use super::*;

    fn product() -> Product {
        Product {
            id: ProductId::new("gid://shopify/Product/4"),
            title: "Jaguar".to_string(),
            description: "Short scale.".to_string(),
            handle: "jaguar".to_string(),
            price_range: PriceRange {
                min_variant_price: Money::new(Decimal::new(129_900, 2), "USD".into()),
            },
            images: Vec::new(),
            variants: vec![
                ProductVariant {
                    id: VariantId::new("gid://shopify/ProductVariant/41"),
                    title: "Candy Apple Red".to_string(),
                    price: Money::new(Decimal::new(129_900, 2), "USD".into()),
                    available_for_sale: true,
                },
                ProductVariant {
                    id: VariantId::new("gid://shopify/ProductVariant/42"),
                    title: "Lake Placid Blue".to_string(),
                    price: Money::new(Decimal::new(129_900, 2), "USD".into()),
                    available_for_sale: false,
                },
            ],
        }
    }

    #[test]
    fn test_render_empty_listing() {
        let mut out = Vec::new();
        render_products(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No products found.\n");
    }

    #[test]
    fn test_render_listing_row() {
        let mut out = Vec::new();
        render_products(&mut out, &[product()]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("jaguar"));
        assert!(text.contains("Jaguar"));
        assert!(text.trim_end().ends_with("$1299.00"));
    }

    #[test]
    fn test_render_product_marks_sold_out() {
        let mut out = Vec::new();
        render_product(&mut out, &product()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("gid://shopify/ProductVariant/41\n"));
        assert!(text.contains("gid://shopify/ProductVariant/42 (sold out)"));
    }
}
