//! Catalog query commands.
//!
//! # Environment Variables
//!
//! - `CATALOG_BASE_URL` - Catalog service base URL
//! - `CATALOG_ACCESS_TOKEN` - Optional bearer token

use velvet_orris_cart::config::CatalogConfig;
use velvet_orris_cart::{CatalogClient, HttpCatalogClient};

/// Fetch and print the full catalog.
#[allow(clippy::print_stdout)]
pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let config = CatalogConfig::from_env()?;
    let catalog = HttpCatalogClient::new(&config)?;

    let products = catalog.products().await?;
    if products.is_empty() {
        println!("Catalog is empty.");
        return Ok(());
    }

    println!("{} product(s):", products.len());
    for product in &products {
        let stock = if product.in_stock { "" } else { "  [out of stock]" };
        println!(
            "  {:>6}  {:<40}  {:<10}  {}{stock}",
            product.id,
            product.name,
            product.category,
            product.price.display()
        );
    }
    Ok(())
}
