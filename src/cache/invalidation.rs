//! Cache invalidation after catalog mutations
//!
//! Runs strictly after the backing mutation commits and strictly before the
//! HTTP response is returned, so a client that writes and immediately reads
//! sees fresh data. Every delete is best-effort: if the cache backend is
//! unreachable the mutation still succeeds and stale entries age out by TTL.

use std::sync::Arc;

use tracing::warn;

use super::{keys, CacheStore};

#[derive(Clone)]
pub struct InvalidationCoordinator {
    cache: Arc<dyn CacheStore>,
}

impl InvalidationCoordinator {
    pub fn new(cache: Arc<dyn CacheStore>) -> Self {
        Self { cache }
    }

    /// Remove every list/item key that could now be stale.
    ///
    /// Always drops the unfiltered list; drops the category list and the
    /// single-item key when known. Only the supplied category is touched: an
    /// item moved between categories leaves the old category's cached list
    /// stale until its TTL expires.
    pub async fn on_item_changed(&self, item_id: Option<&str>, category: Option<&str>) {
        self.delete(keys::LIST_KEY).await;
        if let Some(category) = category {
            let normalized = keys::normalize_category(category);
            self.delete(&keys::category_list_key(&normalized)).await;
        }
        if let Some(item_id) = item_id {
            self.delete(&keys::item_key(item_id)).await;
        }
    }

    /// Drop the credential cache entry for a media object that has been
    /// removed from object storage. Not called for ordinary field updates.
    pub async fn on_media_deleted(&self, media_key: &str) {
        self.delete(&keys::signed_url_key(media_key)).await;
    }

    async fn delete(&self, cache_key: &str) {
        if let Err(e) = self.cache.delete(cache_key).await {
            warn!("Cache invalidation failed for {}: {}", cache_key, e);
        }
    }
}
