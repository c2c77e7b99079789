//! Wishlist state and reducer.
//!
//! Same shape as the cart but keyed by product id alone: a set with
//! insertion-order iteration, no size dimension and no quantity concept.
//! Adding a product already present is a no-op rather than an increment.

use velvet_orris_core::{Product, ProductId};

use crate::intent::WishlistIntent;

/// Wishlist store state: product entries plus drawer visibility.
///
/// `is_open` is ephemeral UI state and is never persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WishlistState {
    /// Entries in insertion order. An id appears at most once.
    pub items: Vec<Product>,
    /// Whether the wishlist drawer overlay is shown.
    pub is_open: bool,
}

impl WishlistState {
    /// Number of wishlist entries.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        u32::try_from(self.items.len()).unwrap_or(u32::MAX)
    }

    /// Whether a product id is present.
    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|product| product.id == product_id)
    }

    /// The persisted projection: product ids only, in insertion order.
    /// Full objects are not persisted to avoid storing stale snapshots.
    #[must_use]
    pub fn ids(&self) -> Vec<ProductId> {
        self.items.iter().map(|product| product.id).collect()
    }
}

/// Apply an intent to the wishlist state, producing the next state.
///
/// Pure and synchronous, like the cart reducer.
#[must_use]
pub fn reduce(mut state: WishlistState, intent: WishlistIntent) -> WishlistState {
    match intent {
        WishlistIntent::Add(product) => {
            if !state.contains(product.id) {
                state.items.push(product);
            }
            state
        }
        WishlistIntent::Remove(product_id) => {
            state.items.retain(|product| product.id != product_id);
            state
        }
        WishlistIntent::Clear => {
            state.items.clear();
            state
        }
        WishlistIntent::Open => {
            state.is_open = true;
            state
        }
        WishlistIntent::Close => {
            state.is_open = false;
            state
        }
        WishlistIntent::Toggle => {
            state.is_open = !state.is_open;
            state
        }
        WishlistIntent::Load(items) => {
            // Loaded data is untrusted: keep the first occurrence of each
            // id so the at-most-once invariant holds no matter what was
            // persisted
            let mut loaded: Vec<Product> = Vec::with_capacity(items.len());
            for product in items {
                if !loaded.iter().any(|entry| entry.id == product.id) {
                    loaded.push(product);
                }
            }
            state.items = loaded;
            state
        }
    }
}
