//! Commerce error types.

use thiserror::Error;

use crate::ids::ProductId;

/// Failures in catalog and cart operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Two feed records share an id.
    #[error("Duplicate product id in feed: {0}")]
    DuplicateProduct(ProductId),

    /// A cart quantity would exceed `u32::MAX`.
    #[error("Cart quantity overflow")]
    Overflow,

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The cart could not be read from or written to storage.
    #[error("Cart storage error: {0}")]
    Cache(#[from] atelier_cache::CacheError),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}
