//! Integration tests for the session cart and checkout.
//!
//! Each test drives one `TestClient`, which replays the session cookie so
//! the cart survives across requests.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::http::StatusCode;
use guitar_shop_integration_tests::{FakeCatalog, TEST_CHECKOUT_URL, TestClient, telecaster};

const BUTTERSCOTCH: &str = "gid://shopify/ProductVariant/101";
const SUNBURST: &str = "gid://shopify/ProductVariant/102";
const STRAT: &str = "gid://shopify/ProductVariant/201";

async fn add(client: &mut TestClient, handle: &str, variant: &str) {
    let response = client
        .post_form("/cart/add", &[("handle", handle), ("variant_id", variant)])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/cart"));
}

// =============================================================================
// Cart page
// =============================================================================

#[tokio::test]
async fn test_new_visitor_has_empty_cart() {
    let (mut client, _) = TestClient::with_fixtures();

    let page = client.get("/cart").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Your Cart is Empty"));

    let badge = client.get("/cart/count").await;
    assert!(badge.body.contains(">0</span>"));
}

#[tokio::test]
async fn test_add_shows_item_in_cart() {
    let (mut client, _) = TestClient::with_fixtures();

    add(&mut client, "telecaster", BUTTERSCOTCH).await;

    let page = client.get("/cart").await;
    assert!(page.body.contains("American Telecaster"));
    assert!(page.body.contains("$999.00"));

    let badge = client.get("/cart/count").await;
    assert!(badge.body.contains(">1</span>"));
}

#[tokio::test]
async fn test_add_with_quantity_from_product_page() {
    let (mut client, _) = TestClient::with_fixtures();

    let page = client.get("/product/telecaster").await;
    assert!(page.body.contains("name=\"quantity\""));

    let response = client
        .post_form(
            "/cart/add",
            &[("handle", "telecaster"), ("variant_id", BUTTERSCOTCH), ("quantity", "3")],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let badge = client.get("/cart/count").await;
    assert!(badge.body.contains(">3</span>"));
}

#[tokio::test]
async fn test_adding_twice_increments_quantity() {
    let (mut client, _) = TestClient::with_fixtures();

    add(&mut client, "telecaster", BUTTERSCOTCH).await;
    add(&mut client, "telecaster", BUTTERSCOTCH).await;
    add(&mut client, "stratocaster", STRAT).await;

    let page = client.get("/cart").await;
    assert!(page.body.contains("$1998.00"));
    assert!(page.body.contains("3 items"));

    let badge = client.get("/cart/count").await;
    assert!(badge.body.contains(">3</span>"));
}

#[tokio::test]
async fn test_carts_are_per_session() {
    let catalog = Arc::new(FakeCatalog::with_products(vec![telecaster()]));
    let mut alice = TestClient::new(catalog.clone());
    add(&mut alice, "telecaster", BUTTERSCOTCH).await;

    let mut bob = TestClient::new(catalog);
    let page = bob.get("/cart").await;
    assert!(page.body.contains("Your Cart is Empty"));
}

// =============================================================================
// HTMX
// =============================================================================

#[tokio::test]
async fn test_htmx_add_returns_badge_and_trigger() {
    let (mut client, _) = TestClient::with_fixtures();

    let response = client
        .htmx_post(
            "/cart/add",
            &[("handle", "telecaster"), ("variant_id", BUTTERSCOTCH), ("quantity", "2")],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("hx-trigger"), Some("cart-updated"));
    assert!(response.body.contains(">2</span>"));
}

#[tokio::test]
async fn test_htmx_update_to_zero_empties_cart() {
    let (mut client, _) = TestClient::with_fixtures();
    add(&mut client, "telecaster", BUTTERSCOTCH).await;

    let response = client
        .htmx_post("/cart/update", &[("variant_id", BUTTERSCOTCH), ("quantity", "0")])
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("hx-trigger"), Some("cart-updated"));
    assert!(response.body.contains("Your Cart is Empty"));
}

#[tokio::test]
async fn test_removing_absent_variant_fires_no_trigger() {
    let (mut client, _) = TestClient::with_fixtures();
    add(&mut client, "telecaster", BUTTERSCOTCH).await;

    let response = client
        .htmx_post("/cart/remove", &[("variant_id", STRAT)])
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.header("hx-trigger").is_none());
    assert!(response.body.contains("American Telecaster"));
}

// =============================================================================
// Update and remove
// =============================================================================

#[tokio::test]
async fn test_update_sets_quantity() {
    let (mut client, _) = TestClient::with_fixtures();
    add(&mut client, "telecaster", BUTTERSCOTCH).await;

    let response = client
        .post_form("/cart/update", &[("variant_id", BUTTERSCOTCH), ("quantity", "4")])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let badge = client.get("/cart/count").await;
    assert!(badge.body.contains(">4</span>"));
}

#[tokio::test]
async fn test_remove_takes_item_out() {
    let (mut client, _) = TestClient::with_fixtures();
    add(&mut client, "telecaster", BUTTERSCOTCH).await;
    add(&mut client, "stratocaster", STRAT).await;

    client
        .post_form("/cart/remove", &[("variant_id", BUTTERSCOTCH)])
        .await;

    let page = client.get("/cart").await;
    assert!(!page.body.contains("American Telecaster"));
    assert!(page.body.contains("Player Stratocaster"));
}

// =============================================================================
// Bad input
// =============================================================================

#[tokio::test]
async fn test_add_with_foreign_variant_is_rejected() {
    let (mut client, _) = TestClient::with_fixtures();

    let response = client
        .post_form("/cart/add", &[("handle", "telecaster"), ("variant_id", STRAT)])
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_sold_out_variant_is_rejected() {
    let (mut client, _) = TestClient::with_fixtures();

    let response = client
        .post_form("/cart/add", &[("handle", "telecaster"), ("variant_id", SUNBURST)])
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let page = client.get("/cart").await;
    assert!(page.body.contains("Your Cart is Empty"));
}

#[tokio::test]
async fn test_add_with_unknown_product_is_404() {
    let (mut client, _) = TestClient::with_fixtures();

    let response = client
        .post_form("/cart/add", &[("handle", "jazzmaster"), ("variant_id", BUTTERSCOTCH)])
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
async fn test_checkout_redirects_to_shopify() {
    let (mut client, catalog) = TestClient::with_fixtures();
    add(&mut client, "telecaster", BUTTERSCOTCH).await;
    add(&mut client, "telecaster", BUTTERSCOTCH).await;

    let response = client.post_form("/checkout", &[]).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some(TEST_CHECKOUT_URL));

    let checkouts = catalog.checkouts();
    assert_eq!(checkouts.len(), 1);
    let lines = checkouts.first().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines.first().unwrap().quantity, 2);
}

#[tokio::test]
async fn test_htmx_checkout_uses_hx_redirect() {
    let (mut client, _) = TestClient::with_fixtures();
    add(&mut client, "telecaster", BUTTERSCOTCH).await;

    let response = client.htmx_post("/checkout", &[]).await;

    assert_eq!(response.header("hx-redirect"), Some(TEST_CHECKOUT_URL));
}

#[tokio::test]
async fn test_checkout_with_empty_cart_returns_to_cart() {
    let (mut client, catalog) = TestClient::with_fixtures();

    let response = client.post_form("/checkout", &[]).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/cart"));
    assert!(catalog.checkouts().is_empty());
}

#[tokio::test]
async fn test_checkout_with_unusable_url_is_bad_gateway() {
    let catalog = Arc::new(
        FakeCatalog::with_products(vec![telecaster()])
            .with_checkout_url("https://guitars.myshopify.com/cart/c/\nbroken"),
    );
    let mut client = TestClient::new(catalog);
    add(&mut client, "telecaster", BUTTERSCOTCH).await;

    let plain = client.post_form("/checkout", &[]).await;
    assert_eq!(plain.status, StatusCode::BAD_GATEWAY);
    assert!(plain.location().is_none());

    let htmx = client.htmx_post("/checkout", &[]).await;
    assert_eq!(htmx.status, StatusCode::BAD_GATEWAY);
    assert!(htmx.header("hx-redirect").is_none());
}
