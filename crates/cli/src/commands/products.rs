//! Catalog browsing commands.
//!
//! Each command mirrors one surface of the shop: the full listing, the
//! homepage strips, and the two filters. Output is one line per product in
//! sheet order.

use farmstand_storefront::catalog::Product;
use farmstand_storefront::config::StorefrontConfig;
use farmstand_storefront::sheets::SheetClient;

/// List every product in sheet order.
pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let client = client()?;
    let catalog = client.catalog().await;
    render(catalog.products().iter());
    Ok(())
}

/// List products flagged for the feature strip.
pub async fn featured() -> Result<(), Box<dyn std::error::Error>> {
    let client = client()?;
    let catalog = client.catalog().await;
    render(catalog.featured().into_iter());
    Ok(())
}

/// List the owner's picks.
pub async fn favorites() -> Result<(), Box<dyn std::error::Error>> {
    let client = client()?;
    let catalog = client.catalog().await;
    render(catalog.favorites().into_iter());
    Ok(())
}

/// Substring search over name, description, and category.
pub async fn search(term: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = client()?;
    let catalog = client.catalog().await;
    render(catalog.search(term).into_iter());
    Ok(())
}

/// Products in one category; "all" lists everything, like the shop page
/// filter buttons.
pub async fn category(name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = client()?;
    let catalog = client.catalog().await;
    if name.eq_ignore_ascii_case("all") {
        render(catalog.products().iter());
    } else {
        render(catalog.in_category(name).into_iter());
    }
    Ok(())
}

fn client() -> Result<SheetClient, Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    Ok(SheetClient::new(&config.sheet))
}

#[allow(clippy::print_stdout)]
fn render<'a>(products: impl Iterator<Item = &'a Product>) {
    let mut any = false;
    for product in products {
        any = true;
        // ProductId's Display ignores width flags; render it to a string first
        println!(
            "{:>4}  {:<28} {:<10} {} / {}",
            product.id.to_string(),
            product.name,
            product.category,
            product.price,
            product.unit
        );
    }
    if !any {
        println!("No products found");
    }
}
