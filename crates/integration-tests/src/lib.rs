//! Integration tests for Velvet Orris.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p velvet-orris-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart store dispatch, aggregates, and drawer state
//! - `wishlist_persistence` - Persistence bridge and rehydration against
//!   file-backed storage
//!
//! The [`fixtures`] module provides a sample perfume catalog and catalog
//! client stubs shared by the test files.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod fixtures {
    //! Shared test fixtures: sample products and catalog stubs.

    use rust_decimal::Decimal;
    use velvet_orris_cart::{CatalogClient, CatalogError};
    use velvet_orris_core::{CurrencyCode, Price, Product, ProductId};

    /// A sample perfume with a price in whole cents.
    #[must_use]
    pub fn perfume(id: i64, name: &str, price_cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            category: "floral".to_string(),
            price: Price::new(Decimal::new(price_cents, 2), CurrencyCode::USD),
            image: Some(format!("https://img.velvetorris.com/{id}.jpg")),
            sizes: vec!["50ml".to_string(), "100ml".to_string()],
            in_stock: true,
        }
    }

    /// The standing three-product test catalog.
    #[must_use]
    pub fn sample_catalog() -> Vec<Product> {
        vec![
            perfume(1, "Iris Nocturne", 1000),
            perfume(2, "Ambre Fauve", 8500),
            perfume(3, "Vetiver Sauvage", 7200),
        ]
    }

    /// Catalog client serving a fixed product list.
    pub struct StaticCatalog {
        products: Vec<Product>,
    }

    impl StaticCatalog {
        #[must_use]
        pub fn new(products: Vec<Product>) -> Self {
            Self { products }
        }
    }

    impl CatalogClient for StaticCatalog {
        async fn products(&self) -> Result<Vec<Product>, CatalogError> {
            Ok(self.products.clone())
        }

        async fn product(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
            Ok(self.products.iter().find(|p| p.id == id).cloned())
        }
    }

    /// Catalog client that always fails, as an unreachable service would.
    pub struct UnreachableCatalog;

    impl CatalogClient for UnreachableCatalog {
        async fn products(&self) -> Result<Vec<Product>, CatalogError> {
            Err(CatalogError::Status(
                reqwest::StatusCode::SERVICE_UNAVAILABLE,
            ))
        }

        async fn product(&self, _id: ProductId) -> Result<Option<Product>, CatalogError> {
            Err(CatalogError::Status(
                reqwest::StatusCode::SERVICE_UNAVAILABLE,
            ))
        }
    }
}
