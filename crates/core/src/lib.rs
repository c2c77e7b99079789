//! Velvet Orris Core - Shared types library.
//!
//! This crate provides common types used across all Velvet Orris components:
//! - `cart` - Cart/wishlist state container for the storefront
//! - `cli` - Command-line tools for inspecting stored state
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product snapshots, type-safe IDs, and decimal prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
