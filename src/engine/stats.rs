use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::domain::Processor;

/// Pipeline counters shared by intake handlers and workers
#[derive(Debug, Default)]
pub struct PipelineStats {
    accepted: AtomicU64,
    rejected: AtomicU64,
    recorded_default: AtomicU64,
    recorded_fallback: AtomicU64,
    duplicates: AtomicU64,
    failed_hops: AtomicU64,
    requeued: AtomicU64,
    store_failures: AtomicU64,
    abandoned: AtomicU64,
}

/// Point-in-time copy of [`PipelineStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub accepted: u64,
    pub rejected: u64,
    pub recorded_default: u64,
    pub recorded_fallback: u64,
    pub duplicates: u64,
    pub failed_hops: u64,
    pub requeued: u64,
    pub store_failures: u64,
    pub abandoned: u64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accepted(&self) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn recorded(&self, processor: Processor) {
        let counter = match processor {
            Processor::Default => &self.recorded_default,
            Processor::Fallback => &self.recorded_fallback,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn duplicate(&self) {
        self.duplicates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn failed_hop(&self) {
        self.failed_hops.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requeued(&self) {
        self.requeued.fetch_add(1, Ordering::Relaxed);
    }

    pub fn store_failure(&self) {
        self.store_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn abandoned(&self) {
        self.abandoned.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            accepted: self.accepted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            recorded_default: self.recorded_default.load(Ordering::Relaxed),
            recorded_fallback: self.recorded_fallback.load(Ordering::Relaxed),
            duplicates: self.duplicates.load(Ordering::Relaxed),
            failed_hops: self.failed_hops.load(Ordering::Relaxed),
            requeued: self.requeued.load(Ordering::Relaxed),
            store_failures: self.store_failures.load(Ordering::Relaxed),
            abandoned: self.abandoned.load(Ordering::Relaxed),
        }
    }
}
