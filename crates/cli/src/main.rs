//! Farmstand CLI - browse the catalog and drive the cart.
//!
//! The CLI is the stand-in rendering layer for the storefront core: it lists
//! what a page would render and prints the notifications a page would toast.
//!
//! # Usage
//!
//! ```bash
//! # The shop page: every product in sheet order
//! farmstand products list
//!
//! # Homepage strips
//! farmstand products featured
//! farmstand products favorites
//!
//! # Filters
//! farmstand products search honey
//! farmstand products category fruit
//!
//! # Cart
//! farmstand cart add 3
//! farmstand cart show
//! farmstand cart count
//! ```
//!
//! # Environment Variables
//!
//! See `farmstand-storefront`'s config module: `FARMSTAND_SHEET_URL`,
//! `FARMSTAND_CART_PATH`, `FARMSTAND_CACHE_TTL_SECS`, all optional.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "farmstand")]
#[command(author, version, about = "Farmstand shop tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Inspect and mutate the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List every product in sheet order
    List,
    /// List products flagged for the feature strip
    Featured,
    /// List the owner's picks
    Favorites,
    /// Case-insensitive substring search over name, description, and category
    Search {
        /// Term to look for
        term: String,
    },
    /// List products in one category (case-insensitive)
    Category {
        /// Category name, e.g. "fruit"
        name: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product by id
    Add {
        /// Product id from the catalog listing
        id: i64,
    },
    /// Show cart lines with quantities and line totals
    Show,
    /// Print the badge count
    Count,
}

#[tokio::main]
async fn main() {
    // Initialize tracing with EnvFilter; default to info for our crates
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "farmstand=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List => commands::products::list().await?,
            ProductsAction::Featured => commands::products::featured().await?,
            ProductsAction::Favorites => commands::products::favorites().await?,
            ProductsAction::Search { term } => commands::products::search(&term).await?,
            ProductsAction::Category { name } => commands::products::category(&name).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Add { id } => commands::cart::add(id).await?,
            CartAction::Show => commands::cart::show()?,
            CartAction::Count => commands::cart::count()?,
        },
    }
    Ok(())
}
