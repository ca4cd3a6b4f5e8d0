//! Product type conversion functions.
//!
//! `graphql_client` generates a separate set of fragment structs per query
//! module, so each query gets its own small set of converters.

use guitar_shop_core::{Image, PriceRange, Product, ProductId, ProductVariant, VariantId};

use super::super::queries::{get_product_by_handle, get_products};
use super::{currency_code_from_debug, parse_money};

// =============================================================================
// get_product_by_handle conversions
// =============================================================================

pub fn convert_product(product: get_product_by_handle::GetProductByHandleProduct) -> Product {
    let fields = product.product_fields;

    Product {
        id: ProductId::new(fields.id),
        title: fields.title,
        description: fields.description,
        handle: fields.handle,
        price_range: PriceRange {
            min_variant_price: convert_money_handle(fields.price_range.min_variant_price),
        },
        images: product
            .images
            .edges
            .into_iter()
            .map(|e| convert_image_handle(e.node))
            .collect(),
        variants: product
            .variants
            .edges
            .into_iter()
            .map(|e| convert_variant_handle(e.node))
            .collect(),
    }
}

fn convert_money_handle(m: get_product_by_handle::MoneyFields) -> guitar_shop_core::Money {
    parse_money(&m.amount, currency_code_from_debug(&m.currency_code))
}

fn convert_image_handle(i: get_product_by_handle::ImageFields) -> Image {
    Image {
        url: i.url,
        alt_text: i.alt_text,
    }
}

fn convert_variant_handle(v: get_product_by_handle::VariantFields) -> ProductVariant {
    ProductVariant {
        id: VariantId::new(v.id),
        title: v.title,
        price: convert_money_handle(v.price),
        available_for_sale: v.available_for_sale,
    }
}

// =============================================================================
// get_products conversions
// =============================================================================

pub fn convert_product_list(conn: get_products::GetProductsProducts) -> Vec<Product> {
    conn.edges
        .into_iter()
        .map(|e| convert_products_list_product(e.node))
        .collect()
}

fn convert_products_list_product(product: get_products::GetProductsProductsEdgesNode) -> Product {
    let fields = product.product_fields;

    Product {
        id: ProductId::new(fields.id),
        title: fields.title,
        description: fields.description,
        handle: fields.handle,
        price_range: PriceRange {
            min_variant_price: convert_money_list(fields.price_range.min_variant_price),
        },
        images: product
            .images
            .edges
            .into_iter()
            .map(|e| convert_image_list(e.node))
            .collect(),
        variants: product
            .variants
            .edges
            .into_iter()
            .map(|e| convert_variant_list(e.node))
            .collect(),
    }
}

fn convert_money_list(m: get_products::MoneyFields) -> guitar_shop_core::Money {
    parse_money(&m.amount, currency_code_from_debug(&m.currency_code))
}

fn convert_image_list(i: get_products::ImageFields) -> Image {
    Image {
        url: i.url,
        alt_text: i.alt_text,
    }
}

fn convert_variant_list(v: get_products::VariantFields) -> ProductVariant {
    ProductVariant {
        id: VariantId::new(v.id),
        title: v.title,
        price: convert_money_list(v.price),
        available_for_sale: v.available_for_sale,
    }
}
