//! Error types.
//!
//! The book itself never fails on validated input. Errors come from the
//! collaborators around it and are split by how the caller should react:
//!
//! - [`DecodeError`]: skip the message, keep the book
//! - [`FeedError::Connection`]: back off and reconnect
//! - [`FeedError::RetriesExhausted`]: give up on the feed, keep serving the
//!   last known book

use thiserror::Error;

/// A depth message could not be turned into a `DepthUpdate`.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Not valid JSON, or missing the depth fields
    #[error("malformed depth message: {0}")]
    Json(#[from] serde_json::Error),

    /// A price or size string is not a finite, non-negative decimal
    #[error("invalid {field} {value:?}")]
    InvalidNumber {
        /// Which field failed ("price" or "size")
        field: &'static str,
        /// The offending wire value
        value: String,
    },

    /// Valid JSON that is not a depth event (e.g. a subscription ack)
    #[error("unexpected message: {0}")]
    UnexpectedMessage(String),
}

/// Failure on the feed side of the pipeline.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Connect, read or handshake failure
    #[error("connection error: {0}")]
    Connection(String),

    /// Reconnect attempts exceeded the configured limit
    #[error("gave up after {attempts} reconnect attempts")]
    RetriesExhausted {
        /// Attempts made before giving up
        attempts: u32,
    },

    /// Message could not be decoded
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl FeedError {
    /// Whether the feed can carry on after this error
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, FeedError::RetriesExhausted { .. })
    }
}

/// Failure inside the book layer.
#[derive(Debug, Error)]
pub enum BookError {
    /// Snapshot could not be SSZ-encoded
    #[error("snapshot encoding failed: {0}")]
    Encoding(String),
}
