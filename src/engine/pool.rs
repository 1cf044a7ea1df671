use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::dispatcher::{DispatchOutcome, Dispatcher};
use super::retry::RetryPolicy;
use crate::gateway::ProcessorGateway;
use crate::queue::{AdmissionQueue, QueuedPayment};
use crate::storage::OutcomeStore;

/// Fixed-size pool of workers draining the admission queue
///
/// Workers share nothing but the queue and the dispatcher. Each one loops
/// until cancelled: dequeue, dispatch, requeue on double failure.
pub struct WorkerPool<G, S>
where
    G: ProcessorGateway + 'static,
    S: OutcomeStore + 'static,
{
    dispatcher: Arc<Dispatcher<G, S>>,
    queue: AdmissionQueue,
    num_workers: usize,
    retry_policy: RetryPolicy,
    shutdown: CancellationToken,
}

impl<G, S> WorkerPool<G, S>
where
    G: ProcessorGateway + 'static,
    S: OutcomeStore + 'static,
{
    /// Create a pool with a single worker and the default retry policy
    pub fn new(dispatcher: Arc<Dispatcher<G, S>>, queue: AdmissionQueue) -> Self {
        Self {
            dispatcher,
            queue,
            num_workers: 1,
            retry_policy: RetryPolicy::default(),
            shutdown: CancellationToken::new(),
        }
    }

    /// Set number of concurrent workers (minimum 1)
    pub fn with_workers(mut self, num: usize) -> Self {
        self.num_workers = num.max(1);
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Stop the workers when `token` is cancelled
    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Spawn one tokio task per worker
    pub fn spawn(self) -> RunningPool {
        let handles = (0..self.num_workers)
            .map(|worker_id| {
                let worker = Worker {
                    id: worker_id,
                    dispatcher: Arc::clone(&self.dispatcher),
                    queue: self.queue.clone(),
                    retry_policy: self.retry_policy,
                    shutdown: self.shutdown.clone(),
                    processed: 0,
                };
                tokio::spawn(worker.run())
            })
            .collect();

        info!(workers = self.num_workers, "Worker pool started");

        RunningPool {
            handles,
            shutdown: self.shutdown,
        }
    }
}

/// Handle to spawned workers
pub struct RunningPool {
    handles: Vec<JoinHandle<WorkerReport>>,
    shutdown: CancellationToken,
}

impl RunningPool {
    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Cancel the workers and wait up to `grace` for in-flight dispatches
    ///
    /// Workers still busy after the grace period are aborted.
    pub async fn shutdown(self, grace: Duration) -> PoolReport {
        self.shutdown.cancel();

        let deadline = tokio::time::Instant::now() + grace;
        let mut workers = Vec::with_capacity(self.handles.len());

        for (worker_id, mut handle) in self.handles.into_iter().enumerate() {
            match tokio::time::timeout_at(deadline, &mut handle).await {
                Ok(Ok(report)) => workers.push(report),
                Ok(Err(e)) => {
                    error!(worker = worker_id, error = %e, "Worker task failed");
                    workers.push(WorkerReport::unfinished(worker_id));
                }
                Err(_) => {
                    warn!(worker = worker_id, "Worker still busy after grace period, aborting");
                    handle.abort();
                    workers.push(WorkerReport::unfinished(worker_id));
                }
            }
        }

        PoolReport { workers }
    }
}

/// Result from a single worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerReport {
    pub worker_id: usize,
    pub processed: u64,
    pub finished: bool,
}

impl WorkerReport {
    fn unfinished(worker_id: usize) -> Self {
        Self {
            worker_id,
            processed: 0,
            finished: false,
        }
    }
}

/// Results from all workers after shutdown
#[derive(Debug, Clone)]
pub struct PoolReport {
    pub workers: Vec<WorkerReport>,
}

impl PoolReport {
    /// Payments taken off the queue across all workers
    pub fn total_processed(&self) -> u64 {
        self.workers.iter().map(|w| w.processed).sum()
    }

    /// Check if every worker stopped within the grace period
    pub fn all_finished(&self) -> bool {
        self.workers.iter().all(|w| w.finished)
    }
}

struct Worker<G, S>
where
    G: ProcessorGateway,
    S: OutcomeStore,
{
    id: usize,
    dispatcher: Arc<Dispatcher<G, S>>,
    queue: AdmissionQueue,
    retry_policy: RetryPolicy,
    shutdown: CancellationToken,
    processed: u64,
}

impl<G, S> Worker<G, S>
where
    G: ProcessorGateway,
    S: OutcomeStore,
{
    async fn run(mut self) -> WorkerReport {
        debug!(worker = self.id, "Worker started");

        loop {
            let payment = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                next = self.queue.next() => match next {
                    Some(payment) => payment,
                    None => break,
                },
            };

            self.processed += 1;
            self.process(payment).await;
        }

        debug!(worker = self.id, processed = self.processed, "Worker stopped");
        WorkerReport {
            worker_id: self.id,
            processed: self.processed,
            finished: true,
        }
    }

    /// Drive one payment until it is recorded, requeued, or abandoned
    async fn process(&self, mut payment: QueuedPayment) {
        loop {
            let attempt = payment.attempt;
            let request = match self.dispatcher.dispatch(payment.request).await {
                DispatchOutcome::Unrouted(request) => request,
                // Store failures are already logged; the payment is not redispatched
                DispatchOutcome::Recorded(_)
                | DispatchOutcome::Duplicate(_)
                | DispatchOutcome::StoreFailed(_) => return,
            };

            payment = QueuedPayment { request, attempt }.retried();
            let failed_cycles = payment.attempt;

            if !self.retry_policy.allows_retry(failed_cycles) {
                self.dispatcher.stats().abandoned();
                error!(
                    worker = self.id,
                    correlation_id = payment.request.correlation_id(),
                    attempts = failed_cycles,
                    "Both processors kept failing, abandoning payment"
                );
                return;
            }

            let delay = self.retry_policy.backoff(failed_cycles);
            if !delay.is_zero() {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {}
                    _ = tokio::time::sleep(delay) => {}
                }
            }

            match self.queue.requeue(payment) {
                Ok(()) => {
                    self.dispatcher.stats().requeued();
                    debug!(worker = self.id, attempts = failed_cycles, "Payment requeued");
                    return;
                }
                Err(returned) if self.shutdown.is_cancelled() => {
                    warn!(
                        worker = self.id,
                        correlation_id = returned.request.correlation_id(),
                        "Queue full during shutdown, payment not requeued"
                    );
                    return;
                }
                Err(returned) => {
                    // Queue is saturated: keep ownership and go round again here
                    warn!(
                        worker = self.id,
                        correlation_id = returned.request.correlation_id(),
                        "Queue full, retrying payment in place"
                    );
                    payment = returned;
                }
            }
        }
    }
}
