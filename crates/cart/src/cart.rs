//! Cart state and reducer.
//!
//! The cart is an ordered sequence of line items keyed by
//! `(product id, size)`, plus an ephemeral drawer-visibility flag. All
//! mutation goes through [`reduce`], a pure function with no I/O: calling
//! it twice with the same state and intent yields structurally equal
//! results, which is what makes it independently unit-testable.

use rust_decimal::Decimal;
use velvet_orris_core::{CurrencyCode, Price, Product, ProductId};

use crate::intent::CartIntent;

/// One cart entry: a product snapshot, the chosen size, and a quantity.
///
/// The product is a snapshot taken at add time - the price is frozen and
/// later catalog changes do not flow into existing lines.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    /// Product snapshot at the time of adding.
    pub product: Product,
    /// Selected size label. Empty string when the product has no sizes.
    pub size: String,
    /// Positive count. A line can never persist at quantity zero; the
    /// reducer removes it instead.
    pub quantity: u32,
}

impl LineItem {
    /// The identity key of this line.
    #[must_use]
    pub fn key(&self) -> (ProductId, &str) {
        (self.product.id, self.size.as_str())
    }

    /// Line subtotal: unit price times quantity.
    #[must_use]
    pub fn line_price(&self) -> Decimal {
        self.product.price.amount * Decimal::from(self.quantity)
    }
}

/// Cart store state: ordered line items plus drawer visibility.
///
/// `is_open` is ephemeral UI state and is never persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartState {
    /// Line items in insertion order.
    pub items: Vec<LineItem>,
    /// Whether the cart drawer overlay is shown.
    pub is_open: bool,
}

impl CartState {
    /// Total item count: the sum of quantities across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    /// Total price: the sum of `price x quantity` across all lines.
    ///
    /// Recomputed on every call - the cart is small and the sum is O(n),
    /// so there is no cache to invalidate. Uses the currency of the first
    /// line; an empty cart totals zero in the default currency. The
    /// catalog serves a single currency, so lines never mix.
    #[must_use]
    pub fn total_price(&self) -> Price {
        let currency = self
            .items
            .first()
            .map_or_else(CurrencyCode::default, |line| {
                line.product.price.currency_code
            });
        let amount = self.items.iter().map(LineItem::line_price).sum();
        Price::new(amount, currency)
    }

    fn position_of(&self, product_id: ProductId, size: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|line| line.key() == (product_id, size))
    }
}

/// Apply an intent to the cart state, producing the next state.
///
/// Pure and synchronous: no I/O happens here. Persistence and change
/// notification are side effects applied by the store layer observing
/// the transition.
///
/// `max_quantity` caps any single line; merges saturate at the cap rather
/// than failing. The cap is part of the public contract via
/// [`CartOptions`](crate::store::CartOptions).
#[must_use]
pub fn reduce(mut state: CartState, intent: CartIntent, max_quantity: u32) -> CartState {
    match intent {
        CartIntent::Add {
            product,
            size,
            quantity,
        } => {
            if quantity == 0 {
                return state;
            }
            match state.position_of(product.id, &size) {
                Some(index) => {
                    if let Some(line) = state.items.get_mut(index) {
                        line.quantity = line
                            .quantity
                            .saturating_add(quantity)
                            .min(max_quantity);
                    }
                }
                None => state.items.push(LineItem {
                    product,
                    size,
                    quantity: quantity.min(max_quantity),
                }),
            }
            state
        }
        CartIntent::Remove { product_id, size } => {
            state
                .items
                .retain(|line| line.key() != (product_id, size.as_str()));
            state
        }
        CartIntent::SetQuantity {
            product_id,
            size,
            quantity,
        } => {
            if quantity == 0 {
                // Invariant: a line never survives at quantity zero
                state
                    .items
                    .retain(|line| line.key() != (product_id, size.as_str()));
            } else if let Some(index) = state.position_of(product_id, &size)
                && let Some(line) = state.items.get_mut(index)
            {
                line.quantity = quantity.min(max_quantity);
            }
            state
        }
        CartIntent::Clear => {
            state.items.clear();
            state
        }
        CartIntent::Open => {
            state.is_open = true;
            state
        }
        CartIntent::Close => {
            state.is_open = false;
            state
        }
        CartIntent::Toggle => {
            state.is_open = !state.is_open;
            state
        }
        CartIntent::Load(items) => {
            // Loaded data is untrusted (it may come from a persisted
            // payload): drop zero-quantity lines and collapse duplicate
            // keys the way Add would, so the identity-key invariant holds
            // no matter what was on disk
            let mut loaded: Vec<LineItem> = Vec::with_capacity(items.len());
            for mut item in items {
                if item.quantity == 0 {
                    continue;
                }
                match loaded.iter().position(|line| line.key() == item.key()) {
                    Some(index) => {
                        if let Some(line) = loaded.get_mut(index) {
                            line.quantity = line
                                .quantity
                                .saturating_add(item.quantity)
                                .min(max_quantity);
                        }
                    }
                    None => {
                        item.quantity = item.quantity.min(max_quantity);
                        loaded.push(item);
                    }
                }
            }
            state.items = loaded;
            state
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use velvet_orris_core::CurrencyCode;

    const CAP: u32 = 99;

    fn perfume(id: i64, price_cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Perfume {id}"),
            category: "floral".to_string(),
            price: Price::new(Decimal::new(price_cents, 2), CurrencyCode::USD),
            image: None,
            sizes: vec!["50ml".to_string(), "100ml".to_string()],
            in_stock: true,
        }
    }

    fn add(product: Product, size: &str, quantity: u32) -> CartIntent {
        CartIntent::Add {
            product,
            size: size.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_add_appends_in_insertion_order() {
        let mut state = CartState::default();
        state = reduce(state, add(perfume(1, 1000), "50ml", 1), CAP);
        state = reduce(state, add(perfume(2, 2000), "50ml", 1), CAP);

        let ids: Vec<i64> = state
            .items
            .iter()
            .map(|line| line.product.id.as_i64())
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_add_same_key_merges_quantities() {
        // Same product and size twice yields one line with summed quantity
        let mut state = CartState::default();
        state = reduce(state, add(perfume(1, 1000), "50ml", 1), CAP);
        state = reduce(state, add(perfume(1, 1000), "50ml", 2), CAP);

        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items.first().map(|l| l.quantity), Some(3));
        assert_eq!(state.total_price().amount, Decimal::new(3000, 2));
    }

    #[test]
    fn test_add_same_product_different_size_is_distinct_line() {
        let mut state = CartState::default();
        state = reduce(state, add(perfume(1, 1000), "50ml", 1), CAP);
        state = reduce(state, add(perfume(1, 1000), "100ml", 1), CAP);

        assert_eq!(state.items.len(), 2);
    }

    #[test]
    fn test_add_zero_quantity_is_noop() {
        let state = reduce(CartState::default(), add(perfume(1, 1000), "50ml", 0), CAP);
        assert!(state.items.is_empty());
    }

    #[test]
    fn test_add_saturates_at_cap() {
        let mut state = CartState::default();
        state = reduce(state, add(perfume(1, 1000), "50ml", 98), CAP);
        state = reduce(state, add(perfume(1, 1000), "50ml", 5), CAP);

        assert_eq!(state.items.first().map(|l| l.quantity), Some(CAP));
    }

    #[test]
    fn test_remove_filters_matching_key() {
        let mut state = CartState::default();
        state = reduce(state, add(perfume(1, 1000), "50ml", 1), CAP);
        state = reduce(state, add(perfume(2, 2000), "50ml", 1), CAP);
        state = reduce(
            state,
            CartIntent::Remove {
                product_id: ProductId::new(1),
                size: "50ml".to_string(),
            },
            CAP,
        );

        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items.first().map(|l| l.product.id.as_i64()), Some(2));
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let mut state = reduce(CartState::default(), add(perfume(1, 1000), "50ml", 1), CAP);
        let before = state.clone();
        state = reduce(
            state,
            CartIntent::Remove {
                product_id: ProductId::new(9),
                size: "50ml".to_string(),
            },
            CAP,
        );

        assert_eq!(state, before);
    }

    #[test]
    fn test_set_quantity_replaces_in_place() {
        let mut state = CartState::default();
        state = reduce(state, add(perfume(1, 1000), "50ml", 1), CAP);
        state = reduce(state, add(perfume(2, 2000), "50ml", 1), CAP);
        state = reduce(
            state,
            CartIntent::SetQuantity {
                product_id: ProductId::new(1),
                size: "50ml".to_string(),
                quantity: 7,
            },
            CAP,
        );

        // Order preserved, only the quantity changed
        assert_eq!(state.items.first().map(|l| l.quantity), Some(7));
        assert_eq!(state.items.first().map(|l| l.product.id.as_i64()), Some(1));
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        let product = perfume(5, 4500);
        let added = reduce(CartState::default(), add(product.clone(), "100ml", 2), CAP);

        let via_set = reduce(
            added.clone(),
            CartIntent::SetQuantity {
                product_id: ProductId::new(5),
                size: "100ml".to_string(),
                quantity: 0,
            },
            CAP,
        );
        let via_remove = reduce(
            added,
            CartIntent::Remove {
                product_id: ProductId::new(5),
                size: "100ml".to_string(),
            },
            CAP,
        );

        assert_eq!(via_set, via_remove);
        assert!(via_set.items.is_empty());
    }

    #[test]
    fn test_set_quantity_missing_key_is_noop() {
        let state = reduce(CartState::default(), add(perfume(1, 1000), "50ml", 1), CAP);
        let before = state.clone();
        let after = reduce(
            state,
            CartIntent::SetQuantity {
                product_id: ProductId::new(2),
                size: "50ml".to_string(),
                quantity: 4,
            },
            CAP,
        );

        assert_eq!(after, before);
    }

    #[test]
    fn test_clear_empties_items_but_keeps_visibility() {
        let mut state = CartState::default();
        state = reduce(state, add(perfume(1, 1000), "50ml", 1), CAP);
        state = reduce(state, CartIntent::Open, CAP);
        state = reduce(state, CartIntent::Clear, CAP);

        assert!(state.items.is_empty());
        assert!(state.is_open);
    }

    #[test]
    fn test_visibility_intents_leave_items_untouched() {
        let mut state = reduce(CartState::default(), add(perfume(1, 1000), "50ml", 1), CAP);
        let items = state.items.clone();

        state = reduce(state, CartIntent::Toggle, CAP);
        assert!(state.is_open);
        state = reduce(state, CartIntent::Toggle, CAP);
        assert!(!state.is_open);
        state = reduce(state, CartIntent::Open, CAP);
        assert!(state.is_open);
        state = reduce(state, CartIntent::Close, CAP);
        assert!(!state.is_open);

        assert_eq!(state.items, items);
    }

    #[test]
    fn test_reducer_is_deterministic() {
        let intent = add(perfume(1, 1000), "50ml", 2);
        let first = reduce(CartState::default(), intent.clone(), CAP);
        let second = reduce(CartState::default(), intent, CAP);
        assert_eq!(first, second);
    }

    #[test]
    fn test_total_items_sums_quantities() {
        let mut state = CartState::default();
        state = reduce(state, add(perfume(1, 1000), "50ml", 2), CAP);
        state = reduce(state, add(perfume(2, 2000), "100ml", 3), CAP);

        assert_eq!(state.total_items(), 5);
    }

    #[test]
    fn test_total_price_scenario() {
        // ADD(id 1, $10.00, "50ml", qty 1) then same key qty 2:
        // one line, quantity 3, total $30.00
        let mut state = CartState::default();
        state = reduce(state, add(perfume(1, 1000), "50ml", 1), CAP);
        state = reduce(state, add(perfume(1, 1000), "50ml", 2), CAP);

        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items.first().map(|l| l.quantity), Some(3));
        assert_eq!(state.total_price().amount, Decimal::new(3000, 2));
        assert_eq!(state.total_price().display(), "$30.00");
    }

    #[test]
    fn test_empty_cart_totals_zero() {
        let state = CartState::default();
        assert_eq!(state.total_items(), 0);
        assert_eq!(state.total_price().amount, Decimal::ZERO);
    }

    fn line(id: i64, size: &str, quantity: u32) -> LineItem {
        LineItem {
            product: perfume(id, 1000),
            size: size.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_load_drops_zero_quantity_lines() {
        let state = reduce(
            CartState::default(),
            CartIntent::Load(vec![line(1, "50ml", 0), line(2, "50ml", 2)]),
            CAP,
        );

        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items.first().map(|l| l.product.id.as_i64()), Some(2));
    }

    #[test]
    fn test_load_merges_duplicate_keys() {
        // Two lines with the same (id, size) collapse into one, summed
        let state = reduce(
            CartState::default(),
            CartIntent::Load(vec![line(1, "50ml", 1), line(1, "50ml", 2)]),
            CAP,
        );

        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items.first().map(|l| l.quantity), Some(3));
    }

    #[test]
    fn test_load_clamps_quantities_to_cap() {
        let state = reduce(
            CartState::default(),
            CartIntent::Load(vec![line(1, "50ml", 98), line(1, "50ml", 98)]),
            CAP,
        );

        assert_eq!(state.items.first().map(|l| l.quantity), Some(CAP));
    }
}
