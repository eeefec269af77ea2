//! Shared fakes for driving the cache layer without real backends.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use explore_catalog::cache::{CacheStats, CacheStore};
use explore_catalog::catalog_store::CatalogStore;
use explore_catalog::config::Config;
use explore_catalog::errors::{AppError, CacheError};
use explore_catalog::models::CatalogItem;
use explore_catalog::object_storage::ObjectStorage;
use explore_catalog::services::CatalogService;

pub fn make_item(id: &str, category: &str, media_key: Option<&str>) -> CatalogItem {
    let mut item = CatalogItem::new(
        id.to_string(),
        id.replace('-', " "),
        format!("description of {}", id),
        category.to_string(),
        None,
        vec!["history".to_string()],
        media_key.map(str::to_string),
    );
    item.accepted = false;
    item
}

/// In-memory catalog store that counts queries, so tests can tell a cache
/// hit from a fresh read.
#[derive(Default)]
pub struct MemoryCatalogStore {
    items: Mutex<Vec<CatalogItem>>,
    pub list_calls: AtomicUsize,
    pub lookup_calls: AtomicUsize,
}

impl MemoryCatalogStore {
    pub fn seeded(items: Vec<CatalogItem>) -> Arc<Self> {
        Arc::new(Self {
            items: Mutex::new(items),
            ..Self::default()
        })
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn list(&self, category_prefix: Option<&str>) -> Result<Vec<CatalogItem>, AppError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .filter(|item| match category_prefix {
                Some(prefix) => item.category.to_lowercase().starts_with(prefix),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<CatalogItem>, AppError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        let items = self.items.lock().unwrap();
        Ok(items.iter().find(|item| item.id == id).cloned())
    }

    async fn find_by_real_id(&self, real_id: &str) -> Result<Option<CatalogItem>, AppError> {
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .find(|item| item.real_id.as_deref() == Some(real_id))
            .cloned())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<CatalogItem>, AppError> {
        let items = self.items.lock().unwrap();
        Ok(items.iter().find(|item| item.title == title).cloned())
    }

    async fn upsert(&self, item: &CatalogItem) -> Result<(), AppError> {
        let mut items = self.items.lock().unwrap();
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item.clone(),
            None => items.push(item.clone()),
        }
        Ok(())
    }

    async fn accept_by_title(&self, title: &str) -> Result<bool, AppError> {
        let mut items = self.items.lock().unwrap();
        match items.iter_mut().find(|item| item.title == title) {
            Some(item) => {
                item.accepted = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_title(&self, title: &str) -> Result<u64, AppError> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|item| item.title != title);
        Ok((before - items.len()) as u64)
    }
}

/// Object storage fake that mints a distinct URL per presigning call, so a
/// cached URL is distinguishable from a fresh one.
#[derive(Default)]
pub struct CountingObjectStorage {
    pub signed_url_calls: AtomicUsize,
    pub deleted_keys: Mutex<Vec<String>>,
    pub put_keys: Mutex<Vec<String>>,
}

#[async_trait]
impl ObjectStorage for CountingObjectStorage {
    async fn signed_url(&self, key: &str, expiry: Duration) -> Result<String, AppError> {
        let call = self.signed_url_calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!(
            "https://media.test/{}?sig={}&expires={}",
            key,
            call,
            expiry.as_secs()
        ))
    }

    async fn put_object(
        &self,
        key: &str,
        _content_type: &str,
        _body: Vec<u8>,
    ) -> Result<(), AppError> {
        self.put_keys.lock().unwrap().push(key.to_string());
        Ok(())
    }

    async fn delete_object(&self, key: &str) -> Result<(), AppError> {
        self.deleted_keys.lock().unwrap().push(key.to_string());
        Ok(())
    }
}

/// Cache backend that is always down.
pub struct FailingCache;

#[async_trait]
impl CacheStore for FailingCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(CacheError::unavailable("connection refused"))
    }

    async fn set_ex(&self, _key: &str, _value: &str, _ttl_secs: u64) -> Result<(), CacheError> {
        Err(CacheError::unavailable("connection refused"))
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Err(CacheError::unavailable("connection refused"))
    }

    async fn delete_prefix(&self, _prefix: &str) -> Result<u64, CacheError> {
        Err(CacheError::unavailable("connection refused"))
    }

    async fn flush_all(&self) -> Result<(), CacheError> {
        Err(CacheError::unavailable("connection refused"))
    }

    async fn stats(&self) -> Result<CacheStats, CacheError> {
        Err(CacheError::unavailable("connection refused"))
    }
}

pub fn service_with(
    store: Arc<MemoryCatalogStore>,
    storage: Arc<CountingObjectStorage>,
    cache: Arc<dyn CacheStore>,
) -> CatalogService {
    CatalogService::new(store, storage, cache, &Config::default())
        .expect("default config is valid")
}
