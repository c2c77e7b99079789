//! Intent messages for the cart and wishlist stores.
//!
//! Stores are mutated only by dispatching one of these messages through a
//! reducer. Intents carry data, never behavior, so a dispatch sequence can
//! be replayed in tests to reproduce any state.

use velvet_orris_core::{Product, ProductId};

use crate::cart::LineItem;

/// Mutation intents for the cart store.
#[derive(Debug, Clone, PartialEq)]
pub enum CartIntent {
    /// Add `quantity` of a product in a given size. Merges with an existing
    /// line matching `(product.id, size)` by incrementing its quantity;
    /// otherwise appends a new line at the tail.
    Add {
        product: Product,
        size: String,
        quantity: u32,
    },
    /// Remove the line matching `(product_id, size)`. No-op when absent.
    Remove { product_id: ProductId, size: String },
    /// Replace the quantity of the matching line in place. A quantity of
    /// zero behaves as [`CartIntent::Remove`]. No-op when absent.
    SetQuantity {
        product_id: ProductId,
        size: String,
        quantity: u32,
    },
    /// Empty the cart. Leaves the drawer visibility untouched.
    Clear,
    /// Show the cart drawer.
    Open,
    /// Hide the cart drawer.
    Close,
    /// Flip the cart drawer visibility.
    Toggle,
    /// Wholesale replacement of the line items, used by rehydration.
    /// Duplicate keys are merged and empty lines dropped; never triggers
    /// a persistence write.
    Load(Vec<LineItem>),
}

/// Mutation intents for the wishlist store.
#[derive(Debug, Clone, PartialEq)]
pub enum WishlistIntent {
    /// Add a product. Idempotent: a product id already present is a no-op.
    Add(Product),
    /// Remove the entry with this product id. No-op when absent.
    Remove(ProductId),
    /// Empty the wishlist. Leaves the drawer visibility untouched.
    Clear,
    /// Show the wishlist drawer.
    Open,
    /// Hide the wishlist drawer.
    Close,
    /// Flip the wishlist drawer visibility.
    Toggle,
    /// Wholesale replacement of the entries, used by rehydration.
    /// Duplicate ids are collapsed; never triggers a persistence write.
    Load(Vec<Product>),
}

impl CartIntent {
    /// Whether this intent can change the line items (as opposed to only
    /// the drawer visibility). Persistence writes are gated on this.
    #[must_use]
    pub const fn mutates_items(&self) -> bool {
        matches!(
            self,
            Self::Add { .. } | Self::Remove { .. } | Self::SetQuantity { .. } | Self::Clear
        )
    }
}

impl WishlistIntent {
    /// Whether this intent can change the entries (as opposed to only the
    /// drawer visibility). Persistence writes are gated on this.
    #[must_use]
    pub const fn mutates_items(&self) -> bool {
        matches!(self, Self::Add(_) | Self::Remove(_) | Self::Clear)
    }
}
