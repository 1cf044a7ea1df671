use thiserror::Error;

use crate::domain::DomainError;
use crate::storage::StorageError;

/// Engine-level errors surfaced by the read path
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
