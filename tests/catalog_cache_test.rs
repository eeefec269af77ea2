//! End-to-end properties of the cache layer, driven through injected fakes.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use explore_catalog::cache::{keys, CacheStore, MemoryCache};
use explore_catalog::errors::AppError;
use explore_catalog::models::NewCatalogItem;

use common::{make_item, service_with, CountingObjectStorage, FailingCache, MemoryCatalogStore};

#[tokio::test]
async fn cache_filling_read_returns_identical_content() {
    let store = MemoryCatalogStore::seeded(vec![make_item("genesis-block", "Artifacts", None)]);
    let storage = Arc::new(CountingObjectStorage::default());
    let service = service_with(store.clone(), storage, Arc::new(MemoryCache::new()));

    let first = service.get_item("genesis-block").await.unwrap();
    let second = service.get_item("genesis-block").await.unwrap();

    assert_eq!(first, second);
    // Second read was served from cache, not the store.
    assert_eq!(store.lookup_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn mutation_is_visible_immediately_after_accept() {
    let store = MemoryCatalogStore::seeded(vec![make_item("genesis-block", "Artifacts", None)]);
    let storage = Arc::new(CountingObjectStorage::default());
    let service = service_with(store, storage, Arc::new(MemoryCache::new()));

    // Populate both the list and the single-item cache.
    let before = service.get_item("genesis-block").await.unwrap();
    assert!(!before.accepted);
    assert!(!service.list_items(None).await.unwrap().is_empty());

    let accepted = service.accept_by_title("genesis block").await.unwrap();
    assert!(accepted.accepted);

    // An immediate read must reflect the mutation, never the cached value.
    let after = service.get_item("genesis-block").await.unwrap();
    assert!(after.accepted);
    let listed = service.list_items(None).await.unwrap();
    assert!(listed.iter().all(|item| item.accepted));
}

#[tokio::test]
async fn signed_url_cache_entry_expires_before_the_credential() {
    let cache = Arc::new(MemoryCache::new());
    let store = MemoryCatalogStore::seeded(vec![make_item("genesis-block", "Artifacts", Some("img-1"))]);
    let storage = Arc::new(CountingObjectStorage::default());
    let service = service_with(store, storage, cache.clone());

    let item = service.get_item("genesis-block").await.unwrap();
    assert!(item.media_url.is_some());

    // Default policy: 3600s credential, 300s skew.
    let ttl = cache.ttl_of(&keys::signed_url_key("img-1")).unwrap();
    assert_eq!(ttl, 3300);
    assert!(ttl < 3600);
}

#[tokio::test]
async fn flush_is_only_a_performance_hit() {
    let cache = Arc::new(MemoryCache::new());
    let store = MemoryCatalogStore::seeded(vec![
        make_item("genesis-block", "Artifacts", Some("img-1")),
        make_item("pizza-day", "Events", None),
    ]);
    let storage = Arc::new(CountingObjectStorage::default());
    let service = service_with(store, storage, cache.clone());

    let before = service.list_items(None).await.unwrap();
    cache.flush_all().await.unwrap();
    let after = service.list_items(None).await.unwrap();

    // Same logical content; only the media URL is freshly minted.
    assert_eq!(before.len(), after.len());
    for (a, b) in before.iter().zip(after.iter()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.title, b.title);
        assert_eq!(a.accepted, b.accepted);
        assert_eq!(a.media_key, b.media_key);
    }
}

#[tokio::test]
async fn lookup_falls_back_to_the_legacy_identifier() {
    let mut item = make_item("genesis-block", "Artifacts", Some("img-1"));
    item.real_id = Some("node-0001".to_string());
    let store = MemoryCatalogStore::seeded(vec![item]);
    let storage = Arc::new(CountingObjectStorage::default());
    let service = service_with(store, storage, Arc::new(MemoryCache::new()));

    let by_id = service.get_item("genesis-block").await.unwrap();
    let by_real_id = service.get_item("node-0001").await.unwrap();
    assert_eq!(by_id, by_real_id);
}

#[tokio::test]
async fn category_filter_is_case_insensitive() {
    let store = MemoryCatalogStore::seeded(vec![
        make_item("genesis-block", "Artifacts", None),
        make_item("pizza-day", "Events", None),
    ]);
    let storage = Arc::new(CountingObjectStorage::default());
    let service = service_with(store, storage, Arc::new(MemoryCache::new()));

    let upper = service.list_items(Some("ARTIFACTS")).await.unwrap();
    let lower = service.list_items(Some("artifacts")).await.unwrap();
    let messy = service.list_items(Some(" Artifacts, ")).await.unwrap();

    assert_eq!(upper.len(), 1);
    assert_eq!(upper[0].id, "genesis-block");
    assert_eq!(upper, lower);
    assert_eq!(upper, messy);
}

#[tokio::test]
async fn normalized_category_variants_share_one_cache_fill() {
    let store = MemoryCatalogStore::seeded(vec![make_item("genesis-block", "Artifacts", None)]);
    let storage = Arc::new(CountingObjectStorage::default());
    let service = service_with(store.clone(), storage, Arc::new(MemoryCache::new()));

    service.list_items(Some("ARTIFACTS")).await.unwrap();
    service.list_items(Some(" Artifacts, ")).await.unwrap();
    service.list_items(Some("artifacts")).await.unwrap();

    assert_eq!(store.list_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn items_without_media_never_touch_object_storage() {
    let store = MemoryCatalogStore::seeded(vec![make_item("genesis-block", "Artifacts", None)]);
    let storage = Arc::new(CountingObjectStorage::default());
    let service = service_with(store, storage.clone(), Arc::new(MemoryCache::new()));

    let items = service.list_items(None).await.unwrap();
    assert_eq!(items.len(), 1);
    assert!(items[0].media_url.is_none());
    assert_eq!(storage.signed_url_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn media_resolution_presigns_once_within_ttl() {
    let store = MemoryCatalogStore::seeded(vec![make_item("genesis-block", "Artifacts", Some("img-1"))]);
    let storage = Arc::new(CountingObjectStorage::default());
    let cache = Arc::new(MemoryCache::new());
    let service = service_with(store, storage.clone(), cache.clone());

    let first = service.get_item("genesis-block").await.unwrap();
    assert_eq!(storage.signed_url_calls.load(Ordering::SeqCst), 1);

    // Second read within TTL: zero further object storage calls. Even after
    // the item snapshot is invalidated, the credential cache still holds.
    cache.delete(&keys::item_key("genesis-block")).await.unwrap();
    let second = service.get_item("genesis-block").await.unwrap();
    assert_eq!(storage.signed_url_calls.load(Ordering::SeqCst), 1);
    assert_eq!(first.media_url, second.media_url);
}

#[tokio::test]
async fn unreachable_cache_degrades_to_the_backing_stores() {
    let store = MemoryCatalogStore::seeded(vec![make_item("genesis-block", "Artifacts", Some("img-1"))]);
    let storage = Arc::new(CountingObjectStorage::default());
    let service = service_with(store.clone(), storage, Arc::new(FailingCache));

    // Reads fall through to the store on every call.
    let items = service.list_items(None).await.unwrap();
    assert_eq!(items.len(), 1);
    let item = service.get_item("genesis-block").await.unwrap();
    assert!(item.media_url.is_some());

    // Writes still succeed; invalidation is best-effort.
    let accepted = service.accept_by_title("genesis block").await.unwrap();
    assert!(accepted.accepted);
}

#[tokio::test]
async fn create_upserts_by_slug_and_shows_up_in_listings() {
    let store = MemoryCatalogStore::seeded(vec![]);
    let storage = Arc::new(CountingObjectStorage::default());
    let service = service_with(store, storage, Arc::new(MemoryCache::new()));

    // Populate the empty list cache first; creation must invalidate it.
    assert!(service.list_items(None).await.unwrap().is_empty());

    let response = service
        .create_item(NewCatalogItem {
            title: "Genesis Block".to_string(),
            description: "The first block".to_string(),
            category: "Artifacts".to_string(),
            kind: Some("artifact".to_string()),
            tags: Some("history, mining".to_string()),
            media: None,
        })
        .await
        .unwrap();

    assert!(response.ok);
    assert_eq!(response.id, "genesis-block");

    let items = service.list_items(None).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "genesis-block");
    assert_eq!(items[0].tags, vec!["history", "mining"]);
    assert!(!items[0].accepted);
}

#[tokio::test]
async fn delete_removes_media_and_purges_every_cache_entry() {
    let cache = Arc::new(MemoryCache::new());
    let store = MemoryCatalogStore::seeded(vec![make_item("genesis-block", "Artifacts", Some("img-1"))]);
    let storage = Arc::new(CountingObjectStorage::default());
    let service = service_with(store, storage.clone(), cache.clone());

    // Warm the item snapshot and the credential cache.
    service.get_item("genesis-block").await.unwrap();
    assert!(cache.ttl_of(&keys::signed_url_key("img-1")).is_some());

    let response = service.delete_by_title("genesis block").await.unwrap();
    assert!(response.ok);
    assert_eq!(response.deleted_count, 1);

    assert_eq!(storage.deleted_keys.lock().unwrap().as_slice(), ["img-1"]);
    assert!(cache.ttl_of(&keys::signed_url_key("img-1")).is_none());
    assert!(cache.ttl_of(&keys::item_key("genesis-block")).is_none());

    let err = service.get_item("genesis-block").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[tokio::test]
async fn deleting_an_unknown_title_is_not_found() {
    let store = MemoryCatalogStore::seeded(vec![]);
    let storage = Arc::new(CountingObjectStorage::default());
    let service = service_with(store, storage, Arc::new(MemoryCache::new()));

    let err = service.delete_by_title("missing").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
    let err = service.accept_by_title("missing").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}
