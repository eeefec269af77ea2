//! Error type definitions for the Explore Catalog application
//!
//! Two families exist on purpose: `AppError` is surfaced to callers, while
//! `CacheError` stays inside the cache layer. A failing cache backend is a
//! degraded condition, never a request failure: the read path treats it as a
//! miss and the write path logs and moves on.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Catalog store (document database) errors
    #[error("Catalog store error: {0}")]
    CatalogStore(#[from] mongodb::error::Error),

    /// Object storage errors (presigning, upload, delete)
    #[error("Object storage error: {message}")]
    ObjectStorage { message: String },

    /// Resource not found errors
    #[error("Not found: {resource} with id {id}")]
    NotFound { resource: String, id: String },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Serialization failures while assembling responses
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Cache backend errors
///
/// Confined to the cache layer and its administrative endpoints; consumers of
/// the cached read path never see these.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Redis command or connection failures
    #[error("Cache backend error: {0}")]
    Backend(#[from] redis::RedisError),

    /// Cache entry (de)serialization failures
    #[error("Cache serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend unreachable or timed out
    #[error("Cache unavailable: {message}")]
    Unavailable { message: String },
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a not found error for a specific resource
    pub fn not_found<R: Into<String>, I: Into<String>>(resource: R, id: I) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an object storage error
    pub fn object_storage<S: Into<String>>(message: S) -> Self {
        Self::ObjectStorage {
            message: message.into(),
        }
    }
}

impl CacheError {
    /// Create an unavailable error with a custom message
    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}
