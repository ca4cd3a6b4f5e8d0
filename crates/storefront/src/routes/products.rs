//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use guitar_shop_core::{Lookup, Product};
use serde::Deserialize;
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub handle: String,
    pub title: String,
    pub description: String,
    /// Price of the preselected variant.
    pub price: String,
    pub images: Vec<ImageView>,
    pub variants: Vec<VariantView>,
    /// Whether to show the variant picker.
    pub has_options: bool,
    pub available_for_sale: bool,
}

/// Image display data for templates.
#[derive(Clone)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
}

/// Variant display data for templates.
#[derive(Clone)]
pub struct VariantView {
    pub id: String,
    pub title: String,
    pub price: String,
    pub available: bool,
    /// Preselected in the picker.
    pub selected: bool,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        // Preselect the first variant that can actually be bought
        let selected = product
            .variants
            .iter()
            .position(|v| v.available_for_sale)
            .unwrap_or(0);

        let variants: Vec<VariantView> = product
            .variants
            .iter()
            .enumerate()
            .map(|(i, v)| VariantView {
                id: v.id.to_string(),
                title: v.title.clone(),
                price: v.price.display(),
                available: v.available_for_sale,
                selected: i == selected,
            })
            .collect();

        let price = variants.get(selected).map_or_else(
            || product.price_range.min_variant_price.display(),
            |v| v.price.clone(),
        );

        Self {
            handle: product.handle.clone(),
            title: product.title.clone(),
            description: product.description.clone(),
            price,
            images: product
                .images
                .iter()
                .enumerate()
                .map(|(i, img)| ImageView {
                    url: img.url.clone(),
                    alt: img
                        .alt_text
                        .clone()
                        .unwrap_or_else(|| format!("{} {}", product.title, i + 1)),
                })
                .collect(),
            variants,
            has_options: product.has_options(),
            available_for_sale: product.available_for_sale(),
        }
    }
}

/// Gallery query parameters.
#[derive(Debug, Deserialize)]
pub struct ShowQuery {
    /// Index of the image shown large.
    pub image: Option<usize>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
    pub selected_image: usize,
}

impl ProductShowTemplate {
    /// The image shown large, if the product has any.
    #[must_use]
    pub fn main_image(&self) -> Option<&ImageView> {
        self.product.images.get(self.selected_image)
    }
}

/// Product not found page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/not_found.html")]
pub struct ProductNotFoundTemplate {
    pub handle: String,
}

/// Display product detail page.
///
/// # Errors
///
/// Returns `AppError::Catalog` if the catalog could not be reached.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    Query(query): Query<ShowQuery>,
) -> Result<Response, AppError> {
    match state.catalog().get_product(&handle).await {
        Lookup::Found(product) => {
            let product = ProductView::from(&product);
            let selected_image = query
                .image
                .filter(|&i| i < product.images.len())
                .unwrap_or(0);

            Ok(ProductShowTemplate {
                product,
                selected_image,
            }
            .into_response())
        }
        Lookup::NotFound => {
            Ok((StatusCode::NOT_FOUND, ProductNotFoundTemplate { handle }).into_response())
        }
        Lookup::Transient(detail) => Err(AppError::Catalog(detail)),
    }
}
