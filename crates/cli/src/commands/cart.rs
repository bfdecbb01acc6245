//! Cart commands.
//!
//! `add` prints the same messages the shop toasts; `show` and `count` read
//! the persisted blob without touching the network.

use farmstand_core::ProductId;
use farmstand_storefront::cart::{CartError, CartStore, FileRepository};
use farmstand_storefront::config::StorefrontConfig;
use farmstand_storefront::sheets::SheetClient;
use rust_decimal::Decimal;

/// Add one unit of a product to the persisted cart.
#[allow(clippy::print_stdout)]
pub async fn add(id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let store = store()?;

    match store.add(ProductId::new(id)).await {
        Ok(outcome) => {
            println!("{outcome}");
            println!("Cart now holds {} item(s)", store.total_quantity());
            Ok(())
        }
        Err(CartError::NotFound(id)) => {
            println!("Product not found!");
            Err(CartError::NotFound(id).into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Show cart lines with quantities and line totals.
#[allow(clippy::print_stdout)]
pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    let store = store()?;
    let cart = store.cart();

    if cart.is_empty() {
        println!("Your cart is empty");
        return Ok(());
    }

    for line in cart.lines() {
        let line_total = line.product.price.amount() * Decimal::from(line.quantity);
        println!(
            "{} x{:<3} {} each, ${line_total:.2}",
            line.product.name, line.quantity, line.product.price
        );
    }
    println!("Total items: {}", cart.total_quantity());
    Ok(())
}

/// Print the badge count.
#[allow(clippy::print_stdout)]
pub fn count() -> Result<(), Box<dyn std::error::Error>> {
    let store = store()?;
    println!("{}", store.total_quantity());
    Ok(())
}

fn store() -> Result<CartStore<FileRepository>, Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let sheets = SheetClient::new(&config.sheet);
    let repository = FileRepository::new(config.cart_path);
    Ok(CartStore::new(sheets, repository))
}
