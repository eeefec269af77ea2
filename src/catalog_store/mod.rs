//! Catalog store abstraction
//!
//! The document database is the system of record for catalog items. The
//! trait is the seam the cache layer and tests depend on; production wires
//! the MongoDB implementation.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::CatalogItem;

pub mod mongo;

pub use mongo::MongoCatalogStore;

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// List items, optionally filtered by a case-insensitive category
    /// prefix. `category_prefix` arrives already normalized.
    async fn list(&self, category_prefix: Option<&str>) -> Result<Vec<CatalogItem>, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<CatalogItem>, AppError>;

    /// Legacy-identifier lookup used as the fallback for [`find_by_id`].
    ///
    /// [`find_by_id`]: CatalogStore::find_by_id
    async fn find_by_real_id(&self, real_id: &str) -> Result<Option<CatalogItem>, AppError>;

    async fn find_by_title(&self, title: &str) -> Result<Option<CatalogItem>, AppError>;

    /// Idempotent upsert keyed by `item.id`.
    async fn upsert(&self, item: &CatalogItem) -> Result<(), AppError>;

    /// Flip the moderation flag; returns whether a document matched.
    async fn accept_by_title(&self, title: &str) -> Result<bool, AppError>;

    /// Physically delete by title; returns the number of documents removed.
    async fn delete_by_title(&self, title: &str) -> Result<u64, AppError>;
}
