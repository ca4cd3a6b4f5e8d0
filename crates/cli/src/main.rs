//! Guitar Shop CLI - catalog browsing and a local cart.
//!
//! # Usage
//!
//! ```bash
//! # List the first 12 products
//! gs-cli products
//!
//! # Show one product and its variant IDs
//! gs-cli product telecaster
//!
//! # Work with the local cart
//! gs-cli cart add telecaster --variant gid://shopify/ProductVariant/7
//! gs-cli cart set gid://shopify/ProductVariant/7 2
//! gs-cli cart show
//!
//! # Create a Shopify checkout and print its URL
//! gs-cli checkout
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPIFY_STORE`, `SHOPIFY_STOREFRONT_ACCESS_TOKEN`, `SHOPIFY_API_VERSION`
//!   - catalog access (not needed for `cart show|remove|set|clear`)
//! - `GS_CART_DIR` - directory holding `cart.json` (default: `.guitar-shop`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use guitar_shop_storefront::config::ShopifyStorefrontConfig;
use guitar_shop_storefront::shopify::StorefrontClient;

mod commands;
mod storage;

use commands::CommandError;
use storage::FileStorage;

#[derive(Parser)]
#[command(name = "gs-cli")]
#[command(author, version, about = "Guitar Shop CLI tools")]
struct Cli {
    /// Directory holding the local cart
    #[arg(long, env = "GS_CART_DIR", default_value = ".guitar-shop", global = true)]
    cart_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products in catalog order
    Products {
        /// Maximum number of products
        #[arg(short, long, default_value_t = 12)]
        limit: i64,
    },
    /// Show a product and its variants
    Product {
        /// Product handle
        handle: String,
    },
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Create a Shopify checkout for the cart and print its URL
    Checkout,
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart
    Show,
    /// Add one unit of a product variant
    Add {
        /// Product handle
        handle: String,

        /// Variant ID (defaults to the product's first variant)
        #[arg(short, long)]
        variant: Option<String>,
    },
    /// Remove a variant
    Remove {
        /// Variant ID
        variant: String,
    },
    /// Set a variant's quantity (0 removes it)
    Set {
        /// Variant ID
        variant: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "guitar_shop_cli=info,guitar_shop_storefront=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn catalog() -> Result<StorefrontClient, CommandError> {
    let config = ShopifyStorefrontConfig::from_env()?;
    Ok(StorefrontClient::new(&config))
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Products { limit } => {
            commands::catalog::products(&catalog()?, limit, &mut out).await?;
        }
        Commands::Product { handle } => {
            commands::catalog::product(&catalog()?, &handle, &mut out).await?;
        }
        Commands::Cart { action } => {
            let store = commands::cart::open(FileStorage::new(cli.cart_dir));
            match action {
                CartAction::Show => commands::cart::show(&store, &mut out)?,
                CartAction::Add { handle, variant } => {
                    commands::cart::add(&store, &catalog()?, &handle, variant.as_deref(), &mut out)
                        .await?;
                }
                CartAction::Remove { variant } => {
                    commands::cart::remove(&store, &variant, &mut out)?;
                }
                CartAction::Set { variant, quantity } => {
                    commands::cart::set(&store, &variant, quantity, &mut out)?;
                }
                CartAction::Clear => commands::cart::clear(&store, &mut out)?,
            }
        }
        Commands::Checkout => {
            let store = commands::cart::open(FileStorage::new(cli.cart_dir));
            commands::checkout::run(&store, &catalog()?, &mut out).await?;
        }
    }
    Ok(())
}
