//! Product snapshot as held by the cart and wishlist.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A catalog product snapshot.
///
/// The catalog service owns the live record; stores hold a copy of the
/// fields needed for display, frozen at the moment the product was added.
/// Later catalog changes (price, stock) do not retroactively alter entries
/// already in a cart or wishlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Stable catalog identity.
    pub id: ProductId,
    /// Display name (e.g., "Iris Nocturne Eau de Parfum").
    pub name: String,
    /// Category handle (e.g., "floral", "woody").
    pub category: String,
    /// Price at snapshot time.
    pub price: Price,
    /// Primary image URL, if any.
    pub image: Option<String>,
    /// Selectable size labels (e.g., "50ml", "100ml"). Empty when the
    /// product has a single unsized form.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Whether the product was purchasable at snapshot time.
    pub in_stock: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CurrencyCode;
    use rust_decimal::Decimal;

    fn sample() -> Product {
        Product {
            id: ProductId::new(1),
            name: "Iris Nocturne".to_string(),
            category: "floral".to_string(),
            price: Price::new(Decimal::new(8500, 2), CurrencyCode::USD),
            image: Some("https://img.example.com/iris.jpg".to_string()),
            sizes: vec!["50ml".to_string(), "100ml".to_string()],
            in_stock: true,
        }
    }

    #[test]
    fn test_serde_round_trip() {
        let product = sample();
        let json = serde_json::to_string(&product).unwrap();
        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(back, product);
    }

    #[test]
    fn test_sizes_default_to_empty() {
        // Catalog records without a sizes field decode as unsized products
        let json = r#"{
            "id": 3,
            "name": "Discovery Set",
            "category": "sets",
            "price": { "amount": "35.00", "currency_code": "USD" },
            "image": null,
            "in_stock": true
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.sizes.is_empty());
    }
}
