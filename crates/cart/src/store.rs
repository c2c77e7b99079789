//! Store objects: dispatch, subscriptions, and the persistence bridge.
//!
//! A store owns its state, a storage backend, and a list of change
//! listeners. `dispatch` applies the pure reducer synchronously, mirrors
//! the persisted projection when appropriate, then notifies listeners with
//! the new state. Stores are explicit objects passed by handle into the UI
//! layer - there is no ambient global state.
//!
//! # Persistence policy
//!
//! Whether a store persists is a per-store configuration flag rather than
//! a hardcoded asymmetry. The shipped defaults encode the product
//! decision: the wishlist survives restarts, the cart is session-scoped.
//!
//! Writes are last-writer-wins: two processes sharing a storage directory
//! overwrite each other with no merge, and neither observes the other
//! until it next rehydrates. Mutation writes begin only after
//! [`hydrate`](WishlistStore::hydrate) has run, so seeding can never
//! trigger a redundant write.
//!
//! # Failure handling
//!
//! Storage and catalog failures (including fetch timeouts) are logged at
//! `warn` and degrade to empty or unchanged state. Nothing here returns an
//! error to the UI: losing shopping state is an inconvenience, not a
//! correctness issue.

use tracing::warn;

use crate::cart::{self, CartState, LineItem};
use crate::catalog::CatalogClient;
use crate::intent::{CartIntent, WishlistIntent};
use crate::storage::{self, PersistedCartLine, StorageBackend};
use crate::wishlist::{self, WishlistState};

/// Default per-line quantity cap. Merging past the cap saturates.
pub const DEFAULT_MAX_QUANTITY: u32 = 99;

type Listener<S> = Box<dyn FnMut(&S)>;

// =============================================================================
// Options
// =============================================================================

/// Cart store policy.
#[derive(Debug, Clone)]
pub struct CartOptions {
    /// Mirror the cart projection to storage and rehydrate on start.
    /// Defaults to `false`: cart contents are intentionally session-scoped
    /// and do not survive a restart.
    pub persistent: bool,
    /// Storage key for the persisted projection.
    pub storage_key: String,
    /// Per-line quantity cap; adds and merges saturate here.
    pub max_quantity: u32,
}

impl Default for CartOptions {
    fn default() -> Self {
        Self {
            persistent: false,
            storage_key: "cart".to_string(),
            max_quantity: DEFAULT_MAX_QUANTITY,
        }
    }
}

/// Wishlist store policy.
#[derive(Debug, Clone)]
pub struct WishlistOptions {
    /// Mirror the id-list projection to storage and rehydrate on start.
    /// Defaults to `true`: the wishlist survives restarts.
    pub persistent: bool,
    /// Storage key for the persisted projection.
    pub storage_key: String,
}

impl Default for WishlistOptions {
    fn default() -> Self {
        Self {
            persistent: true,
            storage_key: "wishlist".to_string(),
        }
    }
}

// =============================================================================
// WishlistStore
// =============================================================================

/// The wishlist store.
pub struct WishlistStore<S: StorageBackend> {
    state: WishlistState,
    options: WishlistOptions,
    storage: S,
    hydrated: bool,
    listeners: Vec<Listener<WishlistState>>,
}

impl<S: StorageBackend> WishlistStore<S> {
    /// Create an empty store with the given backend and policy.
    #[must_use]
    pub fn new(storage: S, options: WishlistOptions) -> Self {
        Self {
            state: WishlistState::default(),
            options,
            storage,
            hydrated: false,
            listeners: Vec::new(),
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub const fn state(&self) -> &WishlistState {
        &self.state
    }

    /// The storage backend (test and tooling access).
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Register a change listener, called after every dispatch with the
    /// new state.
    pub fn subscribe(&mut self, listener: impl FnMut(&WishlistState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Apply an intent synchronously and notify listeners.
    ///
    /// When the store is persistent, hydrated, and the intent mutated the
    /// entries (never for `Load` or visibility intents), the id-list
    /// projection is rewritten, overwriting any prior value.
    pub fn dispatch(&mut self, intent: WishlistIntent) {
        let mutates_items = intent.mutates_items();
        self.state = wishlist::reduce(std::mem::take(&mut self.state), intent);

        if mutates_items && self.options.persistent && self.hydrated {
            self.persist();
        }
        self.notify();
    }

    /// Rehydrate from the persisted id list against the live catalog.
    ///
    /// Reads the id-list projection (silently empty when storage is
    /// absent, corrupt, or from an unknown payload version), issues one
    /// catalog fetch when there is anything to restore, and seeds the
    /// store wholesale via `Load`. Ids no longer in the catalog are
    /// dropped. On fetch failure or timeout the store seeds empty.
    ///
    /// Must run before mutation writes begin; a non-persistent store just
    /// marks itself hydrated.
    pub async fn hydrate<C: CatalogClient>(&mut self, catalog: &C) {
        if !self.options.persistent {
            self.hydrated = true;
            return;
        }

        let ids = self.read_projection(storage::decode_wishlist);
        self.hydrated = true;

        if ids.is_empty() {
            self.dispatch(WishlistIntent::Load(Vec::new()));
            return;
        }

        let items = match catalog.products().await {
            Ok(products) => {
                // Persisted order wins over catalog order
                ids.iter()
                    .filter_map(|id| products.iter().find(|p| p.id == *id).cloned())
                    .collect()
            }
            Err(e) => {
                warn!(error = %e, "wishlist rehydration fetch failed; seeding empty");
                Vec::new()
            }
        };
        self.dispatch(WishlistIntent::Load(items));
    }

    fn read_projection<T: Default>(&self, decode: impl Fn(&str) -> Option<T>) -> T {
        match self.storage.get(&self.options.storage_key) {
            Ok(Some(raw)) => decode(&raw).unwrap_or_else(|| {
                warn!(
                    key = %self.options.storage_key,
                    "discarding unreadable persisted payload"
                );
                T::default()
            }),
            Ok(None) => T::default(),
            Err(e) => {
                warn!(error = %e, "storage read failed; treating as absent");
                T::default()
            }
        }
    }

    fn persist(&mut self) {
        let encoded = match storage::encode_wishlist(&self.state.ids()) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(error = %e, "failed to encode wishlist projection; write dropped");
                return;
            }
        };
        if let Err(e) = self.storage.set(&self.options.storage_key, &encoded) {
            warn!(error = %e, "wishlist persistence write failed");
        }
    }

    fn notify(&mut self) {
        for listener in &mut self.listeners {
            listener(&self.state);
        }
    }
}

// =============================================================================
// CartStore
// =============================================================================

/// The cart store.
pub struct CartStore<S: StorageBackend> {
    state: CartState,
    options: CartOptions,
    storage: S,
    hydrated: bool,
    listeners: Vec<Listener<CartState>>,
}

impl<S: StorageBackend> CartStore<S> {
    /// Create an empty store with the given backend and policy.
    #[must_use]
    pub fn new(storage: S, options: CartOptions) -> Self {
        Self {
            state: CartState::default(),
            options,
            storage,
            hydrated: false,
            listeners: Vec::new(),
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// The storage backend (test and tooling access).
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Register a change listener, called after every dispatch with the
    /// new state.
    pub fn subscribe(&mut self, listener: impl FnMut(&CartState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Apply an intent synchronously and notify listeners.
    ///
    /// Persistence mirroring follows the same gating as the wishlist:
    /// persistent store, hydrated, item-mutating intent.
    pub fn dispatch(&mut self, intent: CartIntent) {
        let mutates_items = intent.mutates_items();
        self.state = cart::reduce(
            std::mem::take(&mut self.state),
            intent,
            self.options.max_quantity,
        );

        if mutates_items && self.options.persistent && self.hydrated {
            self.persist();
        }
        self.notify();
    }

    /// Rehydrate a persistent cart from its `(id, size, quantity)`
    /// projection against the live catalog.
    ///
    /// Lines whose product id has left the catalog are dropped; restored
    /// quantities are clamped to the configured cap. A non-persistent
    /// cart (the default) just marks itself hydrated - cart contents are
    /// deliberately session-scoped.
    pub async fn hydrate<C: CatalogClient>(&mut self, catalog: &C) {
        if !self.options.persistent {
            self.hydrated = true;
            return;
        }

        let lines: Vec<PersistedCartLine> = self.read_projection(storage::decode_cart);
        self.hydrated = true;

        if lines.is_empty() {
            self.dispatch(CartIntent::Load(Vec::new()));
            return;
        }

        let items = match catalog.products().await {
            // Zero quantities, duplicate keys and over-cap quantities are
            // handled by the Load arm of the reducer
            Ok(products) => lines
                .iter()
                .filter_map(|line| {
                    products.iter().find(|p| p.id == line.id).map(|product| LineItem {
                        product: product.clone(),
                        size: line.size.clone(),
                        quantity: line.quantity,
                    })
                })
                .collect(),
            Err(e) => {
                warn!(error = %e, "cart rehydration fetch failed; seeding empty");
                Vec::new()
            }
        };
        self.dispatch(CartIntent::Load(items));
    }

    fn read_projection<T: Default>(&self, decode: impl Fn(&str) -> Option<T>) -> T {
        match self.storage.get(&self.options.storage_key) {
            Ok(Some(raw)) => decode(&raw).unwrap_or_else(|| {
                warn!(
                    key = %self.options.storage_key,
                    "discarding unreadable persisted payload"
                );
                T::default()
            }),
            Ok(None) => T::default(),
            Err(e) => {
                warn!(error = %e, "storage read failed; treating as absent");
                T::default()
            }
        }
    }

    fn persist(&mut self) {
        let lines: Vec<PersistedCartLine> =
            self.state.items.iter().map(PersistedCartLine::from).collect();
        let encoded = match storage::encode_cart(&lines) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(error = %e, "failed to encode cart projection; write dropped");
                return;
            }
        };
        if let Err(e) = self.storage.set(&self.options.storage_key, &encoded) {
            warn!(error = %e, "cart persistence write failed");
        }
    }

    fn notify(&mut self) {
        for listener in &mut self.listeners {
            listener(&self.state);
        }
    }
}
