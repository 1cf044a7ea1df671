use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::config::AppConfig;
use crate::engine::{Dispatcher, PipelineStats, RunningPool, SummaryAggregator, WorkerPool};
use crate::gateway::ProcessorGateway;
use crate::queue::AdmissionQueue;
use crate::storage::OutcomeStore;

/// Process-scoped handles shared by intake handlers and workers
#[derive(Clone)]
pub struct AppContext {
    queue: AdmissionQueue,
    store: Arc<dyn OutcomeStore>,
    stats: Arc<PipelineStats>,
}

impl AppContext {
    pub fn new(queue: AdmissionQueue, store: Arc<dyn OutcomeStore>, stats: Arc<PipelineStats>) -> Self {
        Self {
            queue,
            store,
            stats,
        }
    }

    pub fn queue(&self) -> &AdmissionQueue {
        &self.queue
    }

    pub fn store(&self) -> &Arc<dyn OutcomeStore> {
        &self.store
    }

    pub fn stats(&self) -> &Arc<PipelineStats> {
        &self.stats
    }

    pub fn summaries(&self) -> SummaryAggregator<Arc<dyn OutcomeStore>> {
        SummaryAggregator::new(Arc::clone(&self.store))
    }

    /// Start `config.worker_count` workers draining this context's queue
    /// through `gateway`. They stop when `shutdown` is cancelled.
    pub fn spawn_workers<G>(&self, gateway: G, config: &AppConfig, shutdown: CancellationToken) -> RunningPool
    where
        G: ProcessorGateway + 'static,
    {
        let dispatcher = Dispatcher::new(
            gateway,
            Arc::clone(&self.store),
            config.processor_timeout,
            Arc::clone(&self.stats),
        );

        WorkerPool::new(Arc::new(dispatcher), self.queue.clone())
            .with_workers(config.worker_count)
            .with_retry_policy(config.retry_policy)
            .with_shutdown_token(shutdown)
            .spawn()
    }
}
