//! Credential cache: media key -> presigned retrieval URL
//!
//! Cache entries expire strictly before the presigned URL itself would be
//! rejected by object storage, so a hit can always be returned unchanged
//! without checking URL liveness.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::{keys, CacheStore};
use crate::errors::AppError;
use crate::object_storage::ObjectStorage;

#[derive(Clone)]
pub struct SignedUrlCache {
    cache: Arc<dyn CacheStore>,
    storage: Arc<dyn ObjectStorage>,
    url_expiry: Duration,
    entry_ttl_secs: u64,
}

impl SignedUrlCache {
    /// `entry_ttl = expiry - skew`; rejected unless the skew leaves a
    /// positive gap, which is what keeps cached URLs from outliving their
    /// backing credential.
    pub fn new(
        cache: Arc<dyn CacheStore>,
        storage: Arc<dyn ObjectStorage>,
        url_expiry_secs: u64,
        ttl_skew_secs: u64,
    ) -> Result<Self, AppError> {
        if ttl_skew_secs >= url_expiry_secs {
            return Err(AppError::configuration(format!(
                "signed URL TTL skew ({}s) must be smaller than the signed URL expiry ({}s)",
                ttl_skew_secs, url_expiry_secs
            )));
        }
        Ok(Self {
            cache,
            storage,
            url_expiry: Duration::from_secs(url_expiry_secs),
            entry_ttl_secs: url_expiry_secs - ttl_skew_secs,
        })
    }

    /// Resolve a media key to a usable presigned URL.
    ///
    /// Exactly one object storage call per miss, zero per hit. A presigning
    /// failure propagates and is never cached.
    pub async fn resolve(&self, media_key: &str) -> Result<String, AppError> {
        let cache_key = keys::signed_url_key(media_key);

        match self.cache.get(&cache_key).await {
            Ok(Some(url)) => {
                debug!("Signed URL cache hit for {}", media_key);
                return Ok(url);
            }
            Ok(None) => {}
            Err(e) => warn!("Signed URL cache read failed for {}: {}", media_key, e),
        }

        let url = self.storage.signed_url(media_key, self.url_expiry).await?;

        if let Err(e) = self
            .cache
            .set_ex(&cache_key, &url, self.entry_ttl_secs)
            .await
        {
            warn!("Signed URL cache write failed for {}: {}", media_key, e);
        }
        Ok(url)
    }

    /// Drop the cached URL for a media key. Idempotent and best-effort.
    pub async fn invalidate(&self, media_key: &str) {
        let cache_key = keys::signed_url_key(media_key);
        if let Err(e) = self.cache.delete(&cache_key).await {
            warn!(
                "Failed to invalidate signed URL cache for {}: {}",
                media_key, e
            );
        }
    }

    pub fn entry_ttl_secs(&self) -> u64 {
        self.entry_ttl_secs
    }
}
