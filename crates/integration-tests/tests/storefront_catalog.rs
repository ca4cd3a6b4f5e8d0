//! Integration tests for catalog pages.
//!
//! Runs the full storefront router in-process against `FakeCatalog`.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::http::StatusCode;
use guitar_shop_integration_tests::{FakeCatalog, TestClient, stratocaster, telecaster};

// =============================================================================
// Home
// =============================================================================

#[tokio::test]
async fn test_home_lists_products_in_catalog_order() {
    let (mut client, _) = TestClient::with_fixtures();

    let response = client.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    let tele = response.body.find("American Telecaster").unwrap();
    let strat = response.body.find("Player Stratocaster").unwrap();
    assert!(tele < strat);
    assert!(response.body.contains("$999.00"));
    assert!(response.body.contains("$799.99"));
}

#[tokio::test]
async fn test_home_with_empty_catalog_shows_empty_state() {
    let mut client = TestClient::new(Arc::new(FakeCatalog::default()));

    let response = client.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("No products found"));
}

#[tokio::test]
async fn test_home_degrades_when_catalog_is_down() {
    let mut client = TestClient::new(Arc::new(FakeCatalog::failing()));

    let response = client.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("No products found"));
}

// =============================================================================
// Product page
// =============================================================================

#[tokio::test]
async fn test_product_page_shows_variants() {
    let (mut client, _) = TestClient::with_fixtures();

    let response = client.get("/product/telecaster").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("American Telecaster"));
    assert!(response.body.contains("Butterscotch"));
    assert!(response.body.contains("Sunburst"));
}

#[tokio::test]
async fn test_product_page_with_single_variant() {
    let mut client = TestClient::new(Arc::new(FakeCatalog::with_products(vec![stratocaster()])));

    let response = client.get("/product/stratocaster").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Player Stratocaster"));
    assert!(!response.body.contains("Default Title"));
}

#[tokio::test]
async fn test_product_page_selects_gallery_image() {
    let mut client = TestClient::new(Arc::new(FakeCatalog::with_products(vec![telecaster()])));

    let response = client.get("/product/telecaster?image=1").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("tele-back.jpg"));
}

#[tokio::test]
async fn test_unknown_product_is_404() {
    let (mut client, _) = TestClient::with_fixtures();

    let response = client.get("/product/jazzmaster").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("Product Not Found"));
}

#[tokio::test]
async fn test_product_page_when_catalog_is_down() {
    let mut client = TestClient::new(Arc::new(FakeCatalog::failing()));

    let response = client.get("/product/telecaster").await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
}

// =============================================================================
// Plumbing
// =============================================================================

#[tokio::test]
async fn test_health() {
    let (mut client, _) = TestClient::with_fixtures();

    let response = client.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn test_responses_carry_request_id_and_security_headers() {
    let (mut client, _) = TestClient::with_fixtures();

    let response = client.get("/").await;

    assert!(response.header("x-request-id").is_some());
    assert_eq!(response.header("x-content-type-options"), Some("nosniff"));
    let csp = response.header("content-security-policy").unwrap();
    assert!(csp.contains("https://unpkg.com"));
    assert!(csp.contains("guitars.myshopify.com"));
}
