//! Catalog orchestration
//!
//! Thin composition of the catalog store, object storage, and the cache
//! layer. Reads go through the read cache; every mutation commits to the
//! store first and invalidates second, before the response is returned.

use std::sync::Arc;

use tracing::info;

use crate::cache::{CacheStore, CatalogReadCache, InvalidationCoordinator, SignedUrlCache};
use crate::catalog_store::CatalogStore;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::{CatalogItem, CreateItemResponse, DeleteItemResponse, NewCatalogItem};
use crate::object_storage::ObjectStorage;
use crate::utils;

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    storage: Arc<dyn ObjectStorage>,
    reads: CatalogReadCache,
    signed_urls: SignedUrlCache,
    invalidation: InvalidationCoordinator,
}

impl CatalogService {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        storage: Arc<dyn ObjectStorage>,
        cache: Arc<dyn CacheStore>,
        config: &Config,
    ) -> Result<Self, AppError> {
        let signed_urls = SignedUrlCache::new(
            cache.clone(),
            storage.clone(),
            config.object_storage.signed_url_expiry_secs,
            config.object_storage.signed_url_ttl_skew_secs,
        )?;
        let reads = CatalogReadCache::new(
            cache.clone(),
            store.clone(),
            signed_urls.clone(),
            config.cache.list_ttl_secs,
        );
        let invalidation = InvalidationCoordinator::new(cache);
        Ok(Self {
            store,
            storage,
            reads,
            signed_urls,
            invalidation,
        })
    }

    pub async fn list_items(&self, category: Option<&str>) -> Result<Vec<CatalogItem>, AppError> {
        self.reads.list_items(category).await
    }

    pub async fn get_item(&self, item_id: &str) -> Result<CatalogItem, AppError> {
        self.reads.get_item(item_id).await
    }

    /// Create (or idempotently re-create) an item. Media, when present, is
    /// uploaded before the document references it; list caches are
    /// invalidated after the upsert commits.
    pub async fn create_item(&self, request: NewCatalogItem) -> Result<CreateItemResponse, AppError> {
        let id = utils::slugify(&request.title);
        if id.is_empty() {
            return Err(AppError::validation("title must contain at least one word"));
        }

        let media_key = match &request.media {
            Some(upload) => {
                self.storage
                    .put_object(&upload.file_name, &upload.content_type, upload.data.clone())
                    .await?;
                Some(upload.file_name.clone())
            }
            None => None,
        };

        let item = CatalogItem::new(
            id.clone(),
            request.title,
            request.description,
            request.category,
            request.kind,
            utils::parse_tags(request.tags.as_deref()),
            media_key.clone(),
        );
        self.store.upsert(&item).await?;

        self.invalidation
            .on_item_changed(None, Some(&item.category))
            .await;

        info!("Created catalog item '{}'", id);
        Ok(CreateItemResponse {
            ok: true,
            id,
            media_key,
        })
    }

    /// Flip the moderation flag by title and return the fresh document with
    /// its media URL resolved.
    pub async fn accept_by_title(&self, title: &str) -> Result<CatalogItem, AppError> {
        let matched = self.store.accept_by_title(title).await?;
        if !matched {
            return Err(AppError::not_found("catalog item", title));
        }

        let mut item = self
            .store
            .find_by_title(title)
            .await?
            .ok_or_else(|| AppError::not_found("catalog item", title))?;

        self.invalidation
            .on_item_changed(Some(&item.id), Some(&item.category))
            .await;

        if let Some(media_key) = &item.media_key {
            item.media_url = Some(self.signed_urls.resolve(media_key).await?);
        }
        Ok(item)
    }

    /// Delete an item by title, removing its media object and purging every
    /// cache entry that referenced either.
    pub async fn delete_by_title(&self, title: &str) -> Result<DeleteItemResponse, AppError> {
        let found = self
            .store
            .find_by_title(title)
            .await?
            .ok_or_else(|| AppError::not_found("catalog item", title))?;

        let deleted_count = self.store.delete_by_title(title).await?;

        if let Some(media_key) = &found.media_key {
            self.storage.delete_object(media_key).await?;
            self.invalidation.on_media_deleted(media_key).await;
        }

        self.invalidation
            .on_item_changed(Some(&found.id), Some(&found.category))
            .await;

        if deleted_count == 0 {
            return Err(AppError::not_found("catalog item", title));
        }

        info!("Deleted catalog item '{}'", found.id);
        Ok(DeleteItemResponse {
            ok: true,
            title: title.to_string(),
            deleted_count,
        })
    }
}
