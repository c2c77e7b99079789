//! Velvet Orris cart and wishlist state container.
//!
//! This crate holds the storefront's client-side shopping state: an ordered
//! cart of line items, a wishlist with set semantics, and the persistence
//! bridge that mirrors a projection of each store to durable local storage
//! and rehydrates it against the live catalog on startup.
//!
//! # Architecture
//!
//! - [`intent`] - Intent messages; the only way state is mutated
//! - [`cart`] / [`wishlist`] - Pure reducers and derived aggregates
//! - [`store`] - Store objects: dispatch, subscriptions, persistence wiring
//! - [`storage`] - Durable key/value backends and versioned payloads
//! - [`catalog`] - Catalog service client used during rehydration
//! - [`config`] - Environment-driven configuration
//!
//! Reducers are pure functions with no I/O; all side effects (persistence
//! writes, catalog fetches) live in the store layer. Storage and catalog
//! failures degrade to empty state and are logged, never propagated -
//! losing shopping state is an inconvenience, not a correctness issue.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod intent;
pub mod storage;
pub mod store;
pub mod wishlist;

pub use cart::{CartState, LineItem};
pub use catalog::{CatalogClient, CatalogError, HttpCatalogClient};
pub use intent::{CartIntent, WishlistIntent};
pub use storage::{FileStorage, MemoryStorage, StorageBackend, StorageError};
pub use store::{CartOptions, CartStore, WishlistOptions, WishlistStore};
pub use wishlist::WishlistState;
