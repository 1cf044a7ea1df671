use std::sync::Arc;

use async_trait::async_trait;

use super::error::StorageError;
use crate::domain::{OutcomeEntry, TimeWindow};

/// Result of an insert keyed by correlation id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// First outcome for this correlation id
    Inserted,
    /// An outcome already existed; the store kept the original
    Duplicate,
}

/// Durable record of dispatched payments with pluggable backends.
///
/// Implementations must keep correlation ids unique (first write wins),
/// never expose a partially written entry, and make `purge_all` atomic
/// relative to concurrent inserts.
#[async_trait]
pub trait OutcomeStore: Send + Sync {
    /// Insert an outcome; a second insert for the same id is a no-op
    async fn insert(&self, entry: OutcomeEntry) -> Result<InsertOutcome, StorageError>;

    /// All outcomes with `window.from <= requested_at <= window.to`
    async fn query_range(&self, window: TimeWindow) -> Result<Vec<OutcomeEntry>, StorageError>;

    /// Remove every outcome, returning how many were present at the purge boundary
    async fn purge_all(&self) -> Result<usize, StorageError>;

    /// Number of stored outcomes
    async fn len(&self) -> Result<usize, StorageError>;
}

// Shared handles (workers + handlers) delegate to the inner store
#[async_trait]
impl<S: OutcomeStore + ?Sized> OutcomeStore for Arc<S> {
    async fn insert(&self, entry: OutcomeEntry) -> Result<InsertOutcome, StorageError> {
        (**self).insert(entry).await
    }

    async fn query_range(&self, window: TimeWindow) -> Result<Vec<OutcomeEntry>, StorageError> {
        (**self).query_range(window).await
    }

    async fn purge_all(&self) -> Result<usize, StorageError> {
        (**self).purge_all().await
    }

    async fn len(&self) -> Result<usize, StorageError> {
        (**self).len().await
    }
}
