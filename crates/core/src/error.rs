//! Storage-level error model.
//!
//! Domain crates define their own error enums and wrap [`StoreError`] for
//! failures that originate below the domain (lock poisoning, key conflicts).

use thiserror::Error;

/// Result type returned by [`crate::Repository`] implementations.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record with the same key is already stored.
    #[error("record already exists: {0}")]
    AlreadyExists(String),

    /// An update targeted a key that is not stored.
    #[error("record not found: {0}")]
    Missing(String),

    /// The backing store is unusable (e.g. a poisoned lock).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn already_exists(key: impl core::fmt::Display) -> Self {
        Self::AlreadyExists(key.to_string())
    }

    pub fn missing(key: impl core::fmt::Display) -> Self {
        Self::Missing(key.to_string())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}
