//! Cache layer for the public catalog
//!
//! Three cooperating pieces sit on top of a single key-value backend:
//!
//! - [`SignedUrlCache`]: media key -> presigned URL, with a TTL deliberately
//!   shorter than the credential's real expiry
//! - [`CatalogReadCache`]: cache-aside list and single-item reads with media
//!   URLs already resolved into the cached snapshot
//! - [`InvalidationCoordinator`]: multi-key removal after every mutation
//!
//! The backend is owned by operators, not by this layer: any key may be
//! evicted or the whole database flushed at any time, costing only latency.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::CacheError;

pub mod catalog;
pub mod invalidation;
pub mod keys;
pub mod memory;
pub mod redis;
pub mod signed_url;

pub use catalog::CatalogReadCache;
pub use invalidation::InvalidationCoordinator;
pub use memory::MemoryCache;
pub use redis::RedisCache;
pub use signed_url::SignedUrlCache;

/// Key-value cache backend with per-key TTL.
///
/// Implementations must tolerate concurrent use from many request tasks; no
/// caller ever assumes exclusive ownership of a key.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `value` under `key` with a TTL in seconds.
    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError>;

    /// Delete a single key. Idempotent; deleting an absent key is not an
    /// error.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Delete every key starting with `prefix`, returning how many were
    /// removed.
    async fn delete_prefix(&self, prefix: &str) -> Result<u64, CacheError>;

    /// Drop the entire cache database. Always safe: the backend holds only
    /// derived state.
    async fn flush_all(&self) -> Result<(), CacheError>;

    /// Read-only backend statistics for the maintenance endpoints.
    async fn stats(&self) -> Result<CacheStats, CacheError>;
}

/// Backend statistics reported by the cache maintenance API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    pub used_memory: Option<String>,
    pub connected_clients: Option<u64>,
    pub total_commands_processed: Option<u64>,
}
