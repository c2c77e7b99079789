//! Versioned persisted payloads.
//!
//! Stores persist a derived projection, never full product objects: the
//! wishlist keeps a product-id list and a persistent cart keeps
//! `(id, size, quantity)` triples. Full snapshots are rebuilt from the
//! catalog on rehydration, so stale denormalized data is never trusted
//! from disk.
//!
//! Decoding is defensive: any shape mismatch, parse failure, or unknown
//! version reads as "absent". There is no migration path - an
//! incompatible payload is simply dropped and the store seeds empty.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use velvet_orris_core::ProductId;

use crate::cart::LineItem;

/// Current payload schema version. Bump on any incompatible change.
const PAYLOAD_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct WishlistPayload {
    version: u32,
    saved_at: DateTime<Utc>,
    ids: Vec<ProductId>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CartPayload {
    version: u32,
    saved_at: DateTime<Utc>,
    lines: Vec<PersistedCartLine>,
}

/// One persisted cart line: identity key plus quantity, no snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedCartLine {
    pub id: ProductId,
    pub size: String,
    pub quantity: u32,
}

impl From<&LineItem> for PersistedCartLine {
    fn from(line: &LineItem) -> Self {
        Self {
            id: line.product.id,
            size: line.size.clone(),
            quantity: line.quantity,
        }
    }
}

/// Encode the wishlist projection.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if serialization fails; callers at the
/// persistence boundary log and drop the write.
pub fn encode_wishlist(ids: &[ProductId]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&WishlistPayload {
        version: PAYLOAD_VERSION,
        saved_at: Utc::now(),
        ids: ids.to_vec(),
    })
}

/// Decode a persisted wishlist projection. Any mismatch reads as absent.
#[must_use]
pub fn decode_wishlist(raw: &str) -> Option<Vec<ProductId>> {
    let payload: WishlistPayload = serde_json::from_str(raw).ok()?;
    (payload.version == PAYLOAD_VERSION).then_some(payload.ids)
}

/// Encode the cart projection.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if serialization fails; callers at the
/// persistence boundary log and drop the write.
pub fn encode_cart(lines: &[PersistedCartLine]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&CartPayload {
        version: PAYLOAD_VERSION,
        saved_at: Utc::now(),
        lines: lines.to_vec(),
    })
}

/// Decode a persisted cart projection. Any mismatch reads as absent.
#[must_use]
pub fn decode_cart(raw: &str) -> Option<Vec<PersistedCartLine>> {
    let payload: CartPayload = serde_json::from_str(raw).ok()?;
    (payload.version == PAYLOAD_VERSION).then_some(payload.lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wishlist_round_trip() {
        let ids = vec![ProductId::new(1), ProductId::new(2)];
        let raw = encode_wishlist(&ids).unwrap();
        assert_eq!(decode_wishlist(&raw), Some(ids));
    }

    #[test]
    fn test_cart_round_trip() {
        let lines = vec![PersistedCartLine {
            id: ProductId::new(5),
            size: "100ml".to_string(),
            quantity: 2,
        }];
        let raw = encode_cart(&lines).unwrap();
        assert_eq!(decode_cart(&raw), Some(lines));
    }

    #[test]
    fn test_garbage_reads_as_absent() {
        assert_eq!(decode_wishlist("not json"), None);
        assert_eq!(decode_wishlist(r#"{"ids":"nope"}"#), None);
        assert_eq!(decode_cart(""), None);
    }

    #[test]
    fn test_unknown_version_reads_as_absent() {
        let raw = r#"{"version":99,"saved_at":"2026-01-01T00:00:00Z","ids":[1]}"#;
        assert_eq!(decode_wishlist(raw), None);
    }

    #[test]
    fn test_wrong_shape_reads_as_absent() {
        // A wishlist payload is not a cart payload
        let raw = encode_wishlist(&[ProductId::new(1)]).unwrap();
        assert_eq!(decode_cart(&raw), None);
    }
}
