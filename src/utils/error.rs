//! The `error` module defines the error types used within the `pullsub`
//! application.
//!
//! This module centralizes error handling, providing a consistent way to
//! represent and propagate errors throughout the system. Storage failures
//! and broker-level failures are kept as separate enums so the transport
//! layer can map each to the right HTTP status.

use thiserror::Error;

/// Errors raised by a message store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("message not found: {0}")]
    NotFound(u64),

    #[error("storage backend error: {0}")]
    Backend(#[from] sled::Error),

    #[error("message encoding error: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Main error type for broker operations.
#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("invalid subscription name: {0:?}")]
    InvalidSubscriptionName(String),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Result type for broker operations.
pub type Result<T> = std::result::Result<T, BrokerError>;
