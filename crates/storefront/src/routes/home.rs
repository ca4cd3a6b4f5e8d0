//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use guitar_shop_core::Product;
use tracing::instrument;

use crate::filters;
use crate::state::AppState;

// =============================================================================
// Static Content
// =============================================================================

/// Hero banner copy.
#[derive(Clone)]
pub struct Hero {
    pub eyebrow: &'static str,
    pub title: &'static str,
    pub highlight: &'static str,
    pub subtitle: &'static str,
    pub primary_cta: &'static str,
    pub secondary_cta: &'static str,
    pub social_proof: &'static str,
    pub social_proof_detail: &'static str,
}

impl Default for Hero {
    fn default() -> Self {
        Self {
            eyebrow: "Premium Collection",
            title: "Electric",
            highlight: "Guitar",
            subtitle: "Discover our curated collection of premium electric guitars. \
                       From classic designs to modern innovations, find your perfect sound.",
            primary_cta: "Shop Now",
            secondary_cta: "Learn More",
            social_proof: "2,000+ Happy Customers",
            social_proof_detail: "Trusted worldwide",
        }
    }
}

/// A selling point shown below the product grid.
#[derive(Clone)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

const FEATURES: [Feature; 3] = [
    Feature {
        title: "Premium Quality",
        description: "Handcrafted guitars made with the finest materials",
    },
    Feature {
        title: "Fast Shipping",
        description: "Free worldwide shipping on all orders",
    },
    Feature {
        title: "Secure Payment",
        description: "100% secure checkout powered by Shopify",
    },
];

// =============================================================================
// Views
// =============================================================================

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub handle: String,
    pub title: String,
    pub price: String,
    pub image_url: Option<String>,
    pub image_alt: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        let image = product.featured_image();

        Self {
            handle: product.handle.clone(),
            title: product.title.clone(),
            price: product.price_range.min_variant_price.display(),
            image_url: image.map(|img| img.url.clone()),
            image_alt: image
                .and_then(|img| img.alt_text.clone())
                .unwrap_or_else(|| product.title.clone()),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub hero: Hero,
    /// Product grid, in catalog order.
    pub products: Vec<ProductCardView>,
    pub features: Vec<Feature>,
}

/// Display the home page.
///
/// Catalog failures render the same "no products" state as an empty catalog.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let limit = state.config().products_per_page;

    let products = state
        .catalog()
        .list_products(limit)
        .await
        .unwrap_or_default()
        .iter()
        .map(ProductCardView::from)
        .collect();

    HomeTemplate {
        hero: Hero::default(),
        products,
        features: FEATURES.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use guitar_shop_core::{Image, Money, PriceRange, ProductId};
    use rust_decimal::Decimal;

    use super::*;

    fn product(images: Vec<Image>) -> Product {
        Product {
            id: ProductId::new("gid://shopify/Product/1"),
            title: "Les Paul Standard".to_string(),
            description: String::new(),
            handle: "les-paul-standard".to_string(),
            price_range: PriceRange {
                min_variant_price: Money::new(Decimal::new(249_900, 2), "USD".into()),
            },
            images,
            variants: Vec::new(),
        }
    }

    #[test]
    fn test_card_view_uses_featured_image() {
        let view = ProductCardView::from(&product(vec![
            Image {
                url: "https://cdn.shopify.com/a.jpg".to_string(),
                alt_text: Some("Front".to_string()),
            },
            Image {
                url: "https://cdn.shopify.com/b.jpg".to_string(),
                alt_text: None,
            },
        ]));

        assert_eq!(view.image_url.as_deref(), Some("https://cdn.shopify.com/a.jpg"));
        assert_eq!(view.image_alt, "Front");
        assert_eq!(view.price, "$2499.00");
    }

    #[test]
    fn test_card_view_without_image_falls_back_to_title() {
        let view = ProductCardView::from(&product(Vec::new()));
        assert!(view.image_url.is_none());
        assert_eq!(view.image_alt, "Les Paul Standard");
    }
}
