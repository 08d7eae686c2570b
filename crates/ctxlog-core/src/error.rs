//! Handler errors

use thiserror::Error;

/// Failure while emitting a record
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The output destination rejected the write
    #[error("failed to write log record: {0}")]
    Io(#[from] std::io::Error),

    /// The record could not be serialized
    #[error("failed to encode log record: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HandlerError>;
