//! Cart route handlers.
//!
//! The cart lives in the session (see [`crate::session_cart`]). Plain form
//! posts get a redirect back to the cart page; HTMX requests get the
//! refreshed fragment plus an `HX-Trigger: cart-updated` header.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use guitar_shop_core::cart::{count, subtotal};
use guitar_shop_core::{LineItem, Lookup, VariantId};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, add_breadcrumb};
use crate::filters;
use crate::session_cart::{HxTrigger, SessionCart};
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub variant_id: String,
    pub handle: String,
    pub title: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: Option<String>,
}

impl CartItemView {
    /// Quantity submitted by the "-" button. Reaching zero removes the item.
    #[must_use]
    pub fn decrement(&self) -> i64 {
        i64::from(self.quantity) - 1
    }

    /// Quantity submitted by the "+" button.
    #[must_use]
    pub fn increment(&self) -> i64 {
        i64::from(self.quantity) + 1
    }
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            variant_id: item.variant_id.to_string(),
            handle: item.handle.clone(),
            title: item.title.clone(),
            quantity: item.quantity,
            price: item.unit_price().display(),
            line_price: item.line_total().display(),
            image: Some(item.image.clone()).filter(|url| !url.is_empty()),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&[LineItem]> for CartView {
    fn from(items: &[LineItem]) -> Self {
        Self {
            items: items.iter().map(CartItemView::from).collect(),
            subtotal: subtotal(items).display(),
            item_count: count(items),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub handle: String,
    pub variant_id: String,
    pub quantity: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub variant_id: String,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub variant_id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Whether the request was issued by HTMX.
fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .is_some_and(|v| v.as_bytes() == b"true")
}

/// Display cart page.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<impl IntoResponse, AppError> {
    let cart = SessionCart::load(session).await?;
    let items = cart.items();

    Ok(CartShowTemplate {
        cart: CartView::from(items.as_slice()),
    })
}

/// Add a variant to the cart.
///
/// The product is re-read from the catalog so price and title come from
/// Shopify rather than the form.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown product, `AppError::BadRequest`
/// for a variant that does not belong to it or is sold out, or a catalog or
/// session error.
#[instrument(skip(state, session, headers), fields(handle = %form.handle, variant_id = %form.variant_id))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response, AppError> {
    let product = match state.catalog().get_product(&form.handle).await {
        Lookup::Found(product) => product,
        Lookup::NotFound => return Err(AppError::NotFound(form.handle)),
        Lookup::Transient(detail) => return Err(AppError::Catalog(detail)),
    };

    let variant_id = VariantId::new(form.variant_id);
    let Some(item) = product.line_item(&variant_id) else {
        return Err(AppError::BadRequest(format!(
            "Variant {variant_id} is not part of {}",
            product.handle
        )));
    };
    if !product
        .variant(&variant_id)
        .is_some_and(|v| v.available_for_sale)
    {
        return Err(AppError::BadRequest(format!(
            "Variant {variant_id} of {} is out of stock",
            product.handle
        )));
    }

    let cart = SessionCart::load(session).await?;
    let items = cart.mutate(|store| store.add_quantity(item, form.quantity.unwrap_or(1)))?;
    let trigger = cart.flush().await?;

    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("variant_id", variant_id.as_str())]),
    );

    if is_htmx(&headers) {
        let count = count(&items);
        return Ok((trigger, CartCountTemplate { count }).into_response());
    }

    Ok((trigger, Redirect::to("/cart")).into_response())
}

/// Set a cart item's quantity. Zero or less removes it.
///
/// # Errors
///
/// Returns an error if the session cannot be read or written.
#[instrument(skip(session, headers))]
pub async fn update(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response, AppError> {
    let variant_id = VariantId::new(form.variant_id);

    let cart = SessionCart::load(session).await?;
    let items = cart.mutate(|store| store.update_quantity(&variant_id, form.quantity))?;
    let trigger = cart.flush().await?;

    Ok(cart_response(&headers, trigger, &items))
}

/// Remove an item from the cart.
///
/// # Errors
///
/// Returns an error if the session cannot be read or written.
#[instrument(skip(session, headers))]
pub async fn remove(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response, AppError> {
    let variant_id = VariantId::new(form.variant_id);

    let cart = SessionCart::load(session).await?;
    let items = cart.mutate(|store| store.remove(&variant_id))?;
    let trigger = cart.flush().await?;

    Ok(cart_response(&headers, trigger, &items))
}

fn cart_response(headers: &HeaderMap, trigger: HxTrigger, items: &[LineItem]) -> Response {
    if is_htmx(headers) {
        let cart = CartView::from(items);
        return (trigger, CartItemsTemplate { cart }).into_response();
    }

    (trigger, Redirect::to("/cart")).into_response()
}

/// Get cart count badge (HTMX).
///
/// # Errors
///
/// Returns an error if the session cannot be read.
#[instrument(skip(session))]
pub async fn count_badge(session: Session) -> Result<impl IntoResponse, AppError> {
    let cart = SessionCart::load(session).await?;
    let count = count(&cart.items());

    Ok(CartCountTemplate { count })
}

/// Create a Shopify checkout for the cart and send the browser there.
///
/// An empty cart goes back to the cart page. HTMX requests get an
/// `HX-Redirect` header instead of a 303, since XHR cannot follow a
/// cross-origin redirect.
///
/// # Errors
///
/// Returns `AppError::Catalog` if the checkout could not be created.
#[instrument(skip(state, session, headers))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let cart = SessionCart::load(session).await?;
    let items = cart.items();

    if items.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    match state.catalog().create_cart_checkout(&items).await {
        Lookup::Found(checkout) => {
            tracing::info!(
                checkout_id = %checkout.id,
                total_quantity = checkout.total_quantity,
                "Checkout created"
            );

            let location = HeaderValue::from_str(&checkout.web_url).map_err(|e| {
                tracing::error!(
                    checkout_id = %checkout.id,
                    error = %e,
                    "Checkout URL is not a valid header value"
                );
                AppError::Catalog(format!("invalid checkout URL: {e}"))
            })?;

            if is_htmx(&headers) {
                return Ok([("HX-Redirect", location)].into_response());
            }

            Ok((StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response())
        }
        Lookup::NotFound => Ok(Redirect::to("/cart").into_response()),
        Lookup::Transient(detail) => Err(AppError::Catalog(detail)),
    }
}

#[cfg(test)]
mod tests {
    use guitar_shop_core::{CurrencyCode, ProductId};
    use rust_decimal::Decimal;

    use super::*;

    fn line(variant: &str, cents: i64, quantity: u32) -> LineItem {
        LineItem {
            id: ProductId::new("gid://shopify/Product/1"),
            variant_id: VariantId::new(variant),
            title: "Jazzmaster".to_string(),
            price: Decimal::new(cents, 2),
            currency_code: CurrencyCode::default(),
            quantity,
            image: String::new(),
            handle: "jazzmaster".to_string(),
        }
    }

    #[test]
    fn test_cart_view_totals() {
        let items = vec![line("v1", 10_000, 2), line("v2", 2_550, 1)];
        let view = CartView::from(items.as_slice());

        assert_eq!(view.item_count, 3);
        assert_eq!(view.subtotal, "$225.50");
        assert_eq!(view.items[0].line_price, "$200.00");
        assert!(view.items[0].image.is_none());
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::from([].as_slice());
        assert!(view.is_empty());
        assert_eq!(view.subtotal, "$0.00");
        assert_eq!(view.item_count, 0);
    }

    #[test]
    fn test_quantity_buttons() {
        let view = CartItemView::from(&line("v1", 100, 1));
        assert_eq!(view.decrement(), 0);
        assert_eq!(view.increment(), 2);
    }

    #[test]
    fn test_is_htmx() {
        let mut headers = HeaderMap::new();
        assert!(!is_htmx(&headers));
        headers.insert("HX-Request", HeaderValue::from_static("true"));
        assert!(is_htmx(&headers));
    }
}
