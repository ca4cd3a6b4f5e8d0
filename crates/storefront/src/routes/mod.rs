//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (hero + product grid)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /product/{handle}       - Product detail (?image=N selects gallery image)
//!
//! # Cart (HTMX fragments or redirects)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add a variant (returns count badge, triggers cart-updated)
//! POST /cart/update            - Set quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! POST /checkout               - Create Shopify checkout, redirect to it
//! ```

pub mod cart;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count_badge))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/product/{handle}", get(products::show))
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
}
