//! Cache-aside read path over the catalog store
//!
//! List and single-item reads check the cache first and return snapshots
//! verbatim on a hit; on a miss they query the store, resolve every media key
//! through the credential cache, and only then populate the cache. Cache
//! backend failures on this path degrade to a plain store query.
//!
//! Concurrent misses for the same key may both query and both populate
//! (last write wins); that duplication is accepted rather than coordinated.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::{keys, CacheStore, SignedUrlCache};
use crate::catalog_store::CatalogStore;
use crate::errors::AppError;
use crate::models::CatalogItem;

#[derive(Clone)]
pub struct CatalogReadCache {
    cache: Arc<dyn CacheStore>,
    store: Arc<dyn CatalogStore>,
    signed_urls: SignedUrlCache,
    ttl_secs: u64,
}

impl CatalogReadCache {
    pub fn new(
        cache: Arc<dyn CacheStore>,
        store: Arc<dyn CatalogStore>,
        signed_urls: SignedUrlCache,
        ttl_secs: u64,
    ) -> Self {
        Self {
            cache,
            store,
            signed_urls,
            ttl_secs,
        }
    }

    /// List catalog items, optionally filtered by a case-insensitive
    /// category prefix. Order is whatever the store yields.
    pub async fn list_items(&self, category: Option<&str>) -> Result<Vec<CatalogItem>, AppError> {
        let normalized = category.map(keys::normalize_category);
        let cache_key = match normalized.as_deref() {
            Some(category) => keys::category_list_key(category),
            None => keys::LIST_KEY.to_string(),
        };

        if let Some(items) = self.read_cached::<Vec<CatalogItem>>(&cache_key).await {
            return Ok(items);
        }

        let mut items = self.store.list(normalized.as_deref()).await?;
        for item in &mut items {
            self.resolve_media(item).await?;
        }

        self.write_cached(&cache_key, &items).await;
        Ok(items)
    }

    /// Fetch one item by id, falling back to the legacy `realId` before
    /// reporting not-found. The snapshot is cached under the id the caller
    /// asked with.
    pub async fn get_item(&self, item_id: &str) -> Result<CatalogItem, AppError> {
        let cache_key = keys::item_key(item_id);

        if let Some(item) = self.read_cached::<CatalogItem>(&cache_key).await {
            return Ok(item);
        }

        let found = match self.store.find_by_id(item_id).await? {
            Some(item) => Some(item),
            None => self.store.find_by_real_id(item_id).await?,
        };
        let mut item = found.ok_or_else(|| AppError::not_found("catalog item", item_id))?;

        self.resolve_media(&mut item).await?;
        self.write_cached(&cache_key, &item).await;
        Ok(item)
    }

    async fn resolve_media(&self, item: &mut CatalogItem) -> Result<(), AppError> {
        if let Some(media_key) = &item.media_key {
            item.media_url = Some(self.signed_urls.resolve(media_key).await?);
        }
        Ok(())
    }

    async fn read_cached<T: DeserializeOwned>(&self, cache_key: &str) -> Option<T> {
        match self.cache.get(cache_key).await {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(value) => {
                    debug!("Cache hit for {}", cache_key);
                    Some(value)
                }
                Err(e) => {
                    // Corrupted entry; treat as a miss and let the fill
                    // overwrite it.
                    warn!("Failed to deserialize cache entry {}: {}", cache_key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Cache read failed for {}: {}", cache_key, e);
                None
            }
        }
    }

    async fn write_cached<T: Serialize>(&self, cache_key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize cache entry {}: {}", cache_key, e);
                return;
            }
        };
        if let Err(e) = self.cache.set_ex(cache_key, &json, self.ttl_secs).await {
            warn!("Cache write failed for {}: {}", cache_key, e);
        }
    }
}
