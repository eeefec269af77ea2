//! Object storage abstraction
//!
//! Media bytes live in object storage under a caller-visible key; retrieval
//! goes through time-limited presigned URLs minted here. The trait is the
//! seam the credential cache and tests depend on.

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::AppError;

pub mod s3;

pub use s3::S3ObjectStorage;

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Mint a presigned retrieval URL for `key`, valid for `expiry`.
    async fn signed_url(&self, key: &str, expiry: Duration) -> Result<String, AppError>;

    async fn put_object(
        &self,
        key: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<(), AppError>;

    async fn delete_object(&self, key: &str) -> Result<(), AppError>;
}
