//! Wishlist persistence bridge: projection writes, rehydration, and the
//! documented last-writer-wins behavior over file-backed storage.

use velvet_orris_cart::{
    FileStorage, StorageBackend, WishlistIntent, WishlistOptions, WishlistStore,
};
use velvet_orris_core::ProductId;
use velvet_orris_integration_tests::fixtures::{
    StaticCatalog, UnreachableCatalog, perfume, sample_catalog,
};

async fn hydrated_store(dir: &std::path::Path) -> WishlistStore<FileStorage> {
    let mut store = WishlistStore::new(FileStorage::new(dir), WishlistOptions::default());
    store.hydrate(&StaticCatalog::new(sample_catalog())).await;
    store
}

#[tokio::test]
async fn test_round_trip_preserves_membership() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut store = hydrated_store(dir.path()).await;
        store.dispatch(WishlistIntent::Add(perfume(2, "Ambre Fauve", 8500)));
        store.dispatch(WishlistIntent::Add(perfume(1, "Iris Nocturne", 1000)));
    }

    // "Process restart": a fresh store over the same directory
    let restored = hydrated_store(dir.path()).await;
    let ids: Vec<i64> = restored.state().ids().iter().map(|id| id.as_i64()).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn test_remove_is_mirrored_to_storage() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = hydrated_store(dir.path()).await;
    store.dispatch(WishlistIntent::Add(perfume(1, "Iris Nocturne", 1000)));
    store.dispatch(WishlistIntent::Add(perfume(2, "Ambre Fauve", 8500)));
    store.dispatch(WishlistIntent::Remove(ProductId::new(1)));

    let restored = hydrated_store(dir.path()).await;
    assert_eq!(restored.state().ids(), vec![ProductId::new(2)]);
}

#[tokio::test]
async fn test_ids_gone_from_catalog_are_dropped_on_rehydration() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut store = hydrated_store(dir.path()).await;
        store.dispatch(WishlistIntent::Add(perfume(1, "Iris Nocturne", 1000)));
        store.dispatch(WishlistIntent::Add(perfume(99, "Discontinued", 5000)));
    }

    // id 99 is not in the sample catalog anymore
    let restored = hydrated_store(dir.path()).await;
    assert_eq!(restored.state().ids(), vec![ProductId::new(1)]);
}

#[tokio::test]
async fn test_unreachable_catalog_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut store = hydrated_store(dir.path()).await;
        store.dispatch(WishlistIntent::Add(perfume(1, "Iris Nocturne", 1000)));
    }

    let mut store = WishlistStore::new(FileStorage::new(dir.path()), WishlistOptions::default());
    store.hydrate(&UnreachableCatalog).await;

    // No crash, no error surfaced: the wishlist just seeds empty
    assert!(store.state().items.is_empty());
}

#[tokio::test]
async fn test_corrupt_payload_reads_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::new(dir.path());
    storage.set("wishlist", "{ definitely not a payload").unwrap();

    let store = hydrated_store(dir.path()).await;
    assert!(store.state().items.is_empty());
}

#[tokio::test]
async fn test_last_writer_wins_across_stores() {
    // Two "tabs" share the storage directory; neither observes the other
    // until rehydration, and the later write overwrites the earlier one.
    let dir = tempfile::tempdir().unwrap();

    let mut tab_a = hydrated_store(dir.path()).await;
    let mut tab_b = hydrated_store(dir.path()).await;

    tab_a.dispatch(WishlistIntent::Add(perfume(1, "Iris Nocturne", 1000)));
    tab_b.dispatch(WishlistIntent::Add(perfume(2, "Ambre Fauve", 8500)));

    // Tab A's in-memory state is stale and unaware of tab B's write
    assert_eq!(tab_a.state().ids(), vec![ProductId::new(1)]);

    // Storage holds only the last write: tab B's
    let restored = hydrated_store(dir.path()).await;
    assert_eq!(restored.state().ids(), vec![ProductId::new(2)]);
}

#[tokio::test]
async fn test_empty_persisted_list_skips_catalog_fetch() {
    // Hydrating with nothing persisted must not need the catalog at all:
    // an unreachable service still yields a working empty store.
    let dir = tempfile::tempdir().unwrap();

    let mut store = WishlistStore::new(FileStorage::new(dir.path()), WishlistOptions::default());
    store.hydrate(&UnreachableCatalog).await;

    assert!(store.state().items.is_empty());

    // And the store is fully usable afterwards
    store.dispatch(WishlistIntent::Add(perfume(3, "Vetiver Sauvage", 7200)));
    assert_eq!(store.state().total_items(), 1);
}
