//! Catalog types.
//!
//! Products are owned by the external catalog; these are read-only snapshots
//! held for the duration of a page view (or a cache TTL).

use serde::{Deserialize, Serialize};

use super::id::{ProductId, VariantId};
use super::line_item::NewLineItem;
use super::money::Money;

/// Product or variant image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
}

/// Price range for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    /// Minimum price among all variants.
    pub min_variant_price: Money,
}

/// A purchasable configuration of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: VariantId,
    /// Variant title ("Default Title" when the product has no options).
    pub title: String,
    pub price: Money,
    pub available_for_sale: bool,
}

impl ProductVariant {
    /// Whether the variant is the placeholder Shopify creates for
    /// option-less products.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.title == "Default Title"
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    /// URL slug.
    pub handle: String,
    pub price_range: PriceRange,
    /// Ordered images; the first is the featured image.
    pub images: Vec<Image>,
    /// Ordered purchasable variants.
    pub variants: Vec<ProductVariant>,
}

impl Product {
    /// The first image, used for cards and cart thumbnails.
    #[must_use]
    pub fn featured_image(&self) -> Option<&Image> {
        self.images.first()
    }

    /// Look up a variant by ID.
    #[must_use]
    pub fn variant(&self, id: &VariantId) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| &v.id == id)
    }

    /// The first variant that can be bought.
    #[must_use]
    pub fn first_available_variant(&self) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| v.available_for_sale)
    }

    /// Whether any variant can be bought.
    #[must_use]
    pub fn available_for_sale(&self) -> bool {
        self.variants.iter().any(|v| v.available_for_sale)
    }

    /// Whether the product has real options to choose between.
    #[must_use]
    pub fn has_options(&self) -> bool {
        !(self.variants.len() == 1 && self.variants.iter().all(ProductVariant::is_default))
    }

    /// Build the cart entry for one of this product's variants.
    ///
    /// Returns `None` if the variant does not belong to this product.
    #[must_use]
    pub fn line_item(&self, variant_id: &VariantId) -> Option<NewLineItem> {
        let variant = self.variant(variant_id)?;

        Some(NewLineItem {
            id: self.id.clone(),
            variant_id: variant.id.clone(),
            title: self.title.clone(),
            price: variant.price.amount,
            currency_code: variant.price.currency_code.clone(),
            image: self
                .featured_image()
                .map(|image| image.url.clone())
                .unwrap_or_default(),
            handle: self.handle.clone(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::money::CurrencyCode;

    fn usd(cents: i64) -> Money {
        Money::new(Decimal::new(cents, 2), CurrencyCode::default())
    }

    fn strat() -> Product {
        Product {
            id: ProductId::new("gid://shopify/Product/1"),
            title: "Stratocaster".to_string(),
            description: "Three single coils.".to_string(),
            handle: "stratocaster".to_string(),
            price_range: PriceRange {
                min_variant_price: usd(129_900),
            },
            images: vec![Image {
                url: "https://cdn.shopify.com/strat.jpg".to_string(),
                alt_text: None,
            }],
            variants: vec![
                ProductVariant {
                    id: VariantId::new("gid://shopify/ProductVariant/10"),
                    title: "Sunburst".to_string(),
                    price: usd(129_900),
                    available_for_sale: true,
                },
                ProductVariant {
                    id: VariantId::new("gid://shopify/ProductVariant/11"),
                    title: "Olympic White".to_string(),
                    price: usd(134_900),
                    available_for_sale: false,
                },
            ],
        }
    }

    #[test]
    fn test_line_item_uses_variant_price_and_featured_image() {
        let product = strat();
        let item = product
            .line_item(&VariantId::new("gid://shopify/ProductVariant/11"))
            .unwrap();

        assert_eq!(item.title, "Stratocaster");
        assert_eq!(item.price, Decimal::new(134_900, 2));
        assert_eq!(item.image, "https://cdn.shopify.com/strat.jpg");
        assert_eq!(item.handle, "stratocaster");
    }

    #[test]
    fn test_line_item_unknown_variant() {
        let product = strat();
        assert!(product.line_item(&VariantId::new("nope")).is_none());
    }

    #[test]
    fn test_line_item_without_images_has_empty_thumbnail() {
        let mut product = strat();
        product.images.clear();
        let item = product
            .line_item(&VariantId::new("gid://shopify/ProductVariant/10"))
            .unwrap();
        assert!(item.image.is_empty());
    }

    #[test]
    fn test_has_options() {
        let mut product = strat();
        assert!(product.has_options());

        product.variants.truncate(1);
        product.variants[0].title = "Default Title".to_string();
        assert!(!product.has_options());
    }

    #[test]
    fn test_first_available_variant_skips_sold_out() {
        let mut product = strat();
        product.variants.reverse();
        assert_eq!(
            product.first_available_variant().unwrap().id.as_str(),
            "gid://shopify/ProductVariant/10"
        );

        product.variants.iter_mut().for_each(|v| v.available_for_sale = false);
        assert!(product.first_available_variant().is_none());
    }
}
