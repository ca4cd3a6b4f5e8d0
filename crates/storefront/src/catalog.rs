//! The catalog seam used by route handlers.
//!
//! Handlers never see `ShopifyError`. Every call comes back as a
//! [`Lookup`], with failures logged here so pages can degrade quietly.

use async_trait::async_trait;
use guitar_shop_core::{CheckoutSession, LineItem, Lookup, Product, VariantId};
use tracing::instrument;

use crate::shopify::{CheckoutLineInput, ShopifyError, StorefrontClient};

/// Read access to products plus checkout creation.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Up to `limit` products in catalog order.
    async fn list_products(&self, limit: i64) -> Lookup<Vec<Product>>;

    /// A single product by handle.
    async fn get_product(&self, handle: &str) -> Lookup<Product>;

    /// A checkout session containing one line.
    async fn create_checkout_session(
        &self,
        variant_id: &VariantId,
        quantity: u32,
    ) -> Lookup<CheckoutSession>;

    /// A checkout session containing every line of a cart.
    async fn create_cart_checkout(&self, items: &[LineItem]) -> Lookup<CheckoutSession>;
}

fn transient<T>(operation: &'static str, err: &ShopifyError) -> Lookup<T> {
    tracing::error!(operation, error = %err, "Catalog request failed");
    Lookup::Transient(err.to_string())
}

#[async_trait]
impl Catalog for StorefrontClient {
    #[instrument(skip(self))]
    async fn list_products(&self, limit: i64) -> Lookup<Vec<Product>> {
        match self.get_products(limit).await {
            Ok(products) => Lookup::Found(products),
            Err(e) => transient("list_products", &e),
        }
    }

    #[instrument(skip(self))]
    async fn get_product(&self, handle: &str) -> Lookup<Product> {
        match self.get_product_by_handle(handle).await {
            Ok(product) => Lookup::Found(product),
            Err(e) if e.is_not_found() => {
                tracing::debug!("Product not found");
                Lookup::NotFound
            }
            Err(e) => transient("get_product", &e),
        }
    }

    #[instrument(skip(self), fields(variant_id = %variant_id))]
    async fn create_checkout_session(
        &self,
        variant_id: &VariantId,
        quantity: u32,
    ) -> Lookup<CheckoutSession> {
        let line = CheckoutLineInput {
            merchandise_id: variant_id.clone(),
            quantity,
        };

        match self.create_checkout(vec![line]).await {
            Ok(session) => Lookup::Found(session),
            Err(e) => transient("create_checkout_session", &e),
        }
    }

    #[instrument(skip(self, items), fields(line_count = items.len()))]
    async fn create_cart_checkout(&self, items: &[LineItem]) -> Lookup<CheckoutSession> {
        if items.is_empty() {
            return Lookup::NotFound;
        }

        let lines = items.iter().map(CheckoutLineInput::from).collect();
        match self.create_checkout(lines).await {
            Ok(session) => Lookup::Found(session),
            Err(e) => transient("create_cart_checkout", &e),
        }
    }
}
