//! Integration tests for Guitar Shop.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process router tests against a fake catalog
//! cargo test -p guitar-shop-integration-tests
//!
//! # Live Shopify tests (need SHOPIFY_STORE and SHOPIFY_STOREFRONT_ACCESS_TOKEN)
//! cargo test -p guitar-shop-integration-tests -- --ignored
//! ```
//!
//! The helpers here build the real storefront router with a [`FakeCatalog`]
//! behind it and a [`TestClient`] that carries the session cookie between
//! requests the way a browser would.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use guitar_shop_core::{
    CheckoutId, CheckoutSession, CurrencyCode, Image, LineItem, Lookup, Money, PriceRange, Product, ProductId,
    ProductVariant, VariantId,
};
use guitar_shop_storefront::catalog::Catalog;
use guitar_shop_storefront::config::{ShopifyStorefrontConfig, StorefrontConfig};
use guitar_shop_storefront::state::AppState;
use rust_decimal::Decimal;
use secrecy::SecretString;
use tower::ServiceExt;

/// Store domain used by the test configuration.
pub const TEST_STORE: &str = "guitars.myshopify.com";

/// Checkout URL the fake catalog hands out.
pub const TEST_CHECKOUT_URL: &str = "https://guitars.myshopify.com/cart/c/test-checkout";

// =============================================================================
// Fixtures
// =============================================================================

fn usd(cents: i64) -> Money {
    Money::new(Decimal::new(cents, 2), CurrencyCode::new("USD"))
}

/// Telecaster with two finishes; Sunburst is sold out.
#[must_use]
pub fn telecaster() -> Product {
    Product {
        id: ProductId::new("gid://shopify/Product/100"),
        title: "American Telecaster".to_string(),
        description: "Bright, punchy, and built to gig.".to_string(),
        handle: "telecaster".to_string(),
        price_range: PriceRange {
            min_variant_price: usd(99_900),
        },
        images: vec![
            Image {
                url: "https://cdn.shopify.com/tele-front.jpg".to_string(),
                alt_text: Some("Telecaster front".to_string()),
            },
            Image {
                url: "https://cdn.shopify.com/tele-back.jpg".to_string(),
                alt_text: None,
            },
        ],
        variants: vec![
            ProductVariant {
                id: VariantId::new("gid://shopify/ProductVariant/101"),
                title: "Butterscotch".to_string(),
                price: usd(99_900),
                available_for_sale: true,
            },
            ProductVariant {
                id: VariantId::new("gid://shopify/ProductVariant/102"),
                title: "Sunburst".to_string(),
                price: usd(104_900),
                available_for_sale: false,
            },
        ],
    }
}

/// Stratocaster with a single default variant.
#[must_use]
pub fn stratocaster() -> Product {
    Product {
        id: ProductId::new("gid://shopify/Product/200"),
        title: "Player Stratocaster".to_string(),
        description: "Three single coils.".to_string(),
        handle: "stratocaster".to_string(),
        price_range: PriceRange {
            min_variant_price: usd(79_999),
        },
        images: Vec::new(),
        variants: vec![ProductVariant {
            id: VariantId::new("gid://shopify/ProductVariant/201"),
            title: "Default Title".to_string(),
            price: usd(79_999),
            available_for_sale: true,
        }],
    }
}

/// Storefront configuration suitable for tests.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        products_per_page: 12,
        shopify: ShopifyStorefrontConfig {
            store: TEST_STORE.to_string(),
            api_version: "2024-10".to_string(),
            access_token: SecretString::from("9f2c4e8a1b7d3f6e0a5c9b2d8e4f1a7c"),
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

// =============================================================================
// FakeCatalog
// =============================================================================

/// In-memory catalog.
///
/// When `failing` is set, every call returns `Lookup::Transient`.
#[derive(Default)]
pub struct FakeCatalog {
    products: Vec<Product>,
    failing: bool,
    checkout_url: Option<String>,
    checkouts: Mutex<Vec<Vec<LineItem>>>,
}

impl FakeCatalog {
    #[must_use]
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Hand out `url` instead of [`TEST_CHECKOUT_URL`].
    #[must_use]
    pub fn with_checkout_url(mut self, url: impl Into<String>) -> Self {
        self.checkout_url = Some(url.into());
        self
    }

    /// Carts submitted for checkout so far.
    #[must_use]
    pub fn checkouts(&self) -> Vec<Vec<LineItem>> {
        self.checkouts.lock().unwrap().clone()
    }

    fn session(&self, total_quantity: u32) -> CheckoutSession {
        CheckoutSession {
            id: CheckoutId::new("gid://shopify/Cart/test-checkout"),
            web_url: self
                .checkout_url
                .clone()
                .unwrap_or_else(|| TEST_CHECKOUT_URL.to_string()),
            total_quantity,
        }
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn list_products(&self, limit: i64) -> Lookup<Vec<Product>> {
        if self.failing {
            return Lookup::Transient("catalog offline".to_string());
        }
        let limit = usize::try_from(limit).unwrap_or(0);
        Lookup::Found(self.products.iter().take(limit).cloned().collect())
    }

    async fn get_product(&self, handle: &str) -> Lookup<Product> {
        if self.failing {
            return Lookup::Transient("catalog offline".to_string());
        }
        self.products
            .iter()
            .find(|p| p.handle == handle)
            .cloned()
            .map_or(Lookup::NotFound, Lookup::Found)
    }

    async fn create_checkout_session(
        &self,
        _variant_id: &VariantId,
        quantity: u32,
    ) -> Lookup<CheckoutSession> {
        if self.failing {
            return Lookup::Transient("catalog offline".to_string());
        }
        Lookup::Found(self.session(quantity))
    }

    async fn create_cart_checkout(&self, items: &[LineItem]) -> Lookup<CheckoutSession> {
        if self.failing {
            return Lookup::Transient("catalog offline".to_string());
        }
        self.checkouts.lock().unwrap().push(items.to_vec());
        Lookup::Found(self.session(items.iter().map(|i| i.quantity).sum()))
    }
}

// =============================================================================
// TestClient
// =============================================================================

/// A response with its body collected.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Value of a header as a string, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Redirect target, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.header(header::LOCATION.as_str())
    }
}

/// Sends requests to the router, carrying the session cookie along.
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

impl TestClient {
    /// Build the storefront router over `catalog`.
    #[must_use]
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        let state = AppState::with_catalog(test_config(), catalog);
        Self {
            router: guitar_shop_storefront::app(state),
            cookie: None,
        }
    }

    /// Build a client over a catalog with the standard fixtures.
    #[must_use]
    pub fn with_fixtures() -> (Self, Arc<FakeCatalog>) {
        let catalog = Arc::new(FakeCatalog::with_products(vec![telecaster(), stratocaster()]));
        (Self::new(catalog.clone()), catalog)
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request("GET", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    /// POST a form as a plain browser submission.
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        self.post(uri, fields, false).await
    }

    /// POST a form the way HTMX does (`HX-Request: true`).
    pub async fn htmx_post(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        self.post(uri, fields, true).await
    }

    async fn post(&mut self, uri: &str, fields: &[(&str, &str)], htmx: bool) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();

        let mut builder = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if htmx {
            builder = builder.header("HX-Request", "true");
        }

        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            && let Some(pair) = set_cookie.split(';').next()
        {
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}
