//! Cart line items.
//!
//! The serialized form uses the camelCase keys of the browser cart blob
//! (`variantId`, `currencyCode`, ...) so an existing slot stays readable.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{ProductId, VariantId};
use super::money::{CurrencyCode, Money};

/// One variant + quantity entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product the variant belongs to.
    pub id: ProductId,
    /// Purchasable variant; unique within a cart.
    pub variant_id: VariantId,
    /// Display title.
    pub title: String,
    /// Unit price, serialized as a decimal string.
    pub price: Decimal,
    /// ISO 4217 currency code of `price`.
    pub currency_code: CurrencyCode,
    /// Always at least 1 while the item is in the cart.
    pub quantity: u32,
    /// Thumbnail URL (may be empty).
    pub image: String,
    /// Product handle, for linking back to the product page.
    pub handle: String,
}

impl LineItem {
    /// Unit price with its currency.
    #[must_use]
    pub fn unit_price(&self) -> Money {
        Money::new(self.price, self.currency_code.clone())
    }

    /// Unit price multiplied by quantity, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }

    /// [`Self::amount`] with its currency.
    #[must_use]
    pub fn line_total(&self) -> Money {
        Money::new(self.amount(), self.currency_code.clone())
    }
}

/// A line item missing its quantity field; the input to `CartStore::add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLineItem {
    pub id: ProductId,
    pub variant_id: VariantId,
    pub title: String,
    pub price: Decimal,
    pub currency_code: CurrencyCode,
    pub image: String,
    pub handle: String,
}

impl NewLineItem {
    /// Attach a quantity, producing a storable line item.
    #[must_use]
    pub fn with_quantity(self, quantity: u32) -> LineItem {
        LineItem {
            id: self.id,
            variant_id: self.variant_id,
            title: self.title,
            price: self.price,
            currency_code: self.currency_code,
            quantity,
            image: self.image,
            handle: self.handle,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_browser_cart_blob() {
        let json = r#"[{
            "id": "gid://shopify/Product/1",
            "variantId": "gid://shopify/ProductVariant/10",
            "title": "Stratocaster",
            "price": "1299.0",
            "currencyCode": "USD",
            "quantity": 2,
            "image": "",
            "handle": "stratocaster"
        }]"#;

        let items: Vec<LineItem> = serde_json::from_str(json).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].variant_id.as_str(), "gid://shopify/ProductVariant/10");
        assert_eq!(items[0].price, Decimal::new(12990, 1));
        assert_eq!(items[0].quantity, 2);
    }

    #[test]
    fn test_line_total() {
        let item = NewLineItem {
            id: ProductId::new("p"),
            variant_id: VariantId::new("v"),
            title: "Pick pack".to_string(),
            price: Decimal::new(499, 2),
            currency_code: CurrencyCode::default(),
            image: String::new(),
            handle: "pick-pack".to_string(),
        }
        .with_quantity(3);

        assert_eq!(item.line_total().amount, Decimal::new(1497, 2));
        assert_eq!(item.unit_price().display(), "$4.99");
    }

    #[test]
    fn test_line_total_saturates_on_oversized_price() {
        let json = r#"{
            "id": "p",
            "variantId": "v",
            "title": "Hand-edited",
            "price": "79228162514264337593543950335",
            "currencyCode": "USD",
            "quantity": 2,
            "image": "",
            "handle": "hand-edited"
        }"#;

        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.amount(), Decimal::MAX);
    }
}
