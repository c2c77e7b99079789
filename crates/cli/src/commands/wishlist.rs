//! Wishlist inspection commands.
//!
//! # Environment Variables
//!
//! - `CATALOG_BASE_URL` - Catalog service base URL
//! - `VELVET_STORAGE_DIR` - Durable state directory (default: `.velvet-orris`)

use velvet_orris_cart::config::{CatalogConfig, StorageConfig};
use velvet_orris_cart::{
    FileStorage, HttpCatalogClient, StorageBackend, WishlistOptions, WishlistStore,
};

/// Show the persisted wishlist, hydrated against the live catalog.
///
/// Mirrors what the storefront does at startup: read the persisted id
/// list, fetch the catalog once, and seed a store. Corrupt or absent
/// state shows as an empty wishlist, never an error.
#[allow(clippy::print_stdout)]
pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let catalog_config = CatalogConfig::from_env()?;
    let storage_config = StorageConfig::from_env();

    let catalog = HttpCatalogClient::new(&catalog_config)?;
    let storage = FileStorage::new(storage_config.dir);

    let mut store = WishlistStore::new(storage, WishlistOptions::default());
    store.hydrate(&catalog).await;

    let state = store.state();
    if state.items.is_empty() {
        println!("Wishlist is empty.");
        return Ok(());
    }

    println!("{} item(s):", state.total_items());
    for product in &state.items {
        println!(
            "  {:>6}  {:<40}  {}",
            product.id,
            product.name,
            product.price.display()
        );
    }
    Ok(())
}

/// Drop the persisted wishlist projection.
#[allow(clippy::print_stdout)]
pub fn clear() -> Result<(), Box<dyn std::error::Error>> {
    let storage_config = StorageConfig::from_env();
    let mut storage = FileStorage::new(storage_config.dir);

    let key = WishlistOptions::default().storage_key;
    storage.remove(&key)?;

    println!("Cleared persisted wishlist.");
    Ok(())
}
