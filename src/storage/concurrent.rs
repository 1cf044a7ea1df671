use std::sync::RwLock;

use async_trait::async_trait;
use dashmap::{DashMap, Entry};

use super::error::StorageError;
use super::traits::{InsertOutcome, OutcomeStore};
use crate::domain::{OutcomeEntry, TimeWindow};

/// Concurrent in-memory outcome store using DashMap
///
/// Inserts and queries share a read guard on the current generation, so
/// they run concurrently with per-shard locking. `purge_all` takes the write
/// guard and swaps in an empty map: every insert lands wholly before or
/// wholly after the purge, and no reader sees a half-cleared map.
pub struct ConcurrentOutcomeStore {
    generation: RwLock<DashMap<String, OutcomeEntry>>,
}

impl ConcurrentOutcomeStore {
    /// Create a new empty outcome store
    pub fn new() -> Self {
        Self {
            generation: RwLock::new(DashMap::new()),
        }
    }
}

impl Default for ConcurrentOutcomeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OutcomeStore for ConcurrentOutcomeStore {
    async fn insert(&self, entry: OutcomeEntry) -> Result<InsertOutcome, StorageError> {
        let outcomes = self.generation.read().map_err(|_| StorageError::Poisoned)?;

        match outcomes.entry(entry.correlation_id.clone()) {
            Entry::Occupied(_) => Ok(InsertOutcome::Duplicate),
            Entry::Vacant(e) => {
                e.insert(entry);
                Ok(InsertOutcome::Inserted)
            }
        }
    }

    async fn query_range(&self, window: TimeWindow) -> Result<Vec<OutcomeEntry>, StorageError> {
        if window.is_empty() {
            return Ok(Vec::new());
        }

        let outcomes = self.generation.read().map_err(|_| StorageError::Poisoned)?;
        Ok(outcomes
            .iter()
            .filter(|e| window.contains(e.value().requested_at))
            .map(|e| e.value().clone())
            .collect())
    }

    async fn purge_all(&self) -> Result<usize, StorageError> {
        let mut outcomes = self.generation.write().map_err(|_| StorageError::Poisoned)?;
        let purged = std::mem::take(&mut *outcomes);
        Ok(purged.len())
    }

    async fn len(&self) -> Result<usize, StorageError> {
        let outcomes = self.generation.read().map_err(|_| StorageError::Poisoned)?;
        Ok(outcomes.len())
    }
}
