//! Live tests against a real Shopify store.
//!
//! Ignored by default. Requires `SHOPIFY_STORE` and
//! `SHOPIFY_STOREFRONT_ACCESS_TOKEN`:
//!
//! ```bash
//! cargo test -p guitar-shop-integration-tests --test shopify_live -- --ignored
//! ```

#![allow(clippy::unwrap_used)]

use guitar_shop_core::Lookup;
use guitar_shop_storefront::catalog::Catalog;
use guitar_shop_storefront::config::ShopifyStorefrontConfig;
use guitar_shop_storefront::shopify::StorefrontClient;

fn client() -> StorefrontClient {
    let config = ShopifyStorefrontConfig::from_env().unwrap();
    StorefrontClient::new(&config)
}

#[tokio::test]
#[ignore = "Requires Shopify credentials"]
async fn test_live_product_listing_respects_limit() {
    let products = client().list_products(3).await;

    let Lookup::Found(products) = products else {
        panic!("expected products, got {products:?}");
    };
    assert!(products.len() <= 3);
}

#[tokio::test]
#[ignore = "Requires Shopify credentials"]
async fn test_live_listed_product_resolves_by_handle() {
    let client = client();
    let products = client.list_products(1).await.unwrap_or_default();
    let Some(first) = products.first() else {
        return;
    };

    let product = client.get_product(&first.handle).await.into_option().unwrap();
    assert_eq!(product.handle, first.handle);
    assert!(!product.variants.is_empty());
}

#[tokio::test]
#[ignore = "Requires Shopify credentials"]
async fn test_live_unknown_handle_is_not_found() {
    let lookup = client()
        .get_product("this-handle-does-not-exist-4f1a7c")
        .await;

    assert!(matches!(lookup, Lookup::NotFound));
}
