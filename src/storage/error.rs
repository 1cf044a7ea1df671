use thiserror::Error;

/// Storage-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Outcome store lock poisoned")]
    Poisoned,

    #[error("Storage backend error: {0}")]
    Backend(String),
}
