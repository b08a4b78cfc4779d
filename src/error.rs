//! Error types for SMS expense sync.

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Message source error: {0}")]
    Source(#[from] SourceError),

    #[error("Checkpoint error: {0}")]
    Checkpoint(#[from] CheckpointError),
}

/// Errors raised by a message source adapter.
///
/// None of these are retried automatically — retry policy belongs to the
/// host application.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Read access to the message store is not granted")]
    PermissionDenied,

    #[error("No message store is available on this host")]
    Unsupported,

    #[error("Message store query failed: {0}")]
    Query(String),
}

/// Errors raised by a checkpoint store backend.
#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    #[error("Checkpoint storage failed: {0}")]
    Storage(String),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
