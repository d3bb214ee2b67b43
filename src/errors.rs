use thiserror::Error;

/// Error type that captures persistence failures for the expense book.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("No expense book found at {0}")]
    NotInitialized(String),
    #[error("Backup `{0}` not found")]
    BackupMissing(String),
}
