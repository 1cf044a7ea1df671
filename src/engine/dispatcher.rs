use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use super::stats::PipelineStats;
use crate::domain::{DispatchRecord, OutcomeEntry, PaymentRequest, Processor};
use crate::gateway::ProcessorGateway;
use crate::storage::{InsertOutcome, OutcomeStore};

/// How one dispatch cycle ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Accepted by `processor` and recorded
    Recorded(Processor),
    /// Accepted by `processor`, but an outcome for this id already existed
    Duplicate(Processor),
    /// Accepted by `processor`, but the outcome could not be written
    StoreFailed(Processor),
    /// Neither processor accepted; the request is handed back for requeueing
    Unrouted(PaymentRequest),
}

/// Runs the two-hop protocol for a single payment: default, then fallback,
/// recording the first acceptance in the outcome store
pub struct Dispatcher<G, S>
where
    G: ProcessorGateway,
    S: OutcomeStore,
{
    gateway: G,
    store: S,
    timeout: Duration,
    stats: Arc<PipelineStats>,
}

impl<G, S> Dispatcher<G, S>
where
    G: ProcessorGateway,
    S: OutcomeStore,
{
    /// Create a dispatcher; `timeout` bounds every processor call
    pub fn new(gateway: G, store: S, timeout: Duration, stats: Arc<PipelineStats>) -> Self {
        Self {
            gateway,
            store,
            timeout,
            stats,
        }
    }

    pub fn stats(&self) -> &Arc<PipelineStats> {
        &self.stats
    }

    /// Stamp `requested_at` now and try each processor in order
    pub async fn dispatch(&self, request: PaymentRequest) -> DispatchOutcome {
        let record = DispatchRecord::stamp(request, Utc::now());

        for processor in Processor::ALL {
            match self.gateway.send(processor, &record, self.timeout).await {
                Ok(()) => return self.record(&record, processor).await,
                Err(e) => {
                    self.stats.failed_hop();
                    warn!(
                        correlation_id = record.correlation_id(),
                        processor = %e.processor(),
                        timeout = e.is_timeout(),
                        error = %e,
                        "Processor refused payment"
                    );
                }
            }
        }

        DispatchOutcome::Unrouted(record.into_request())
    }

    async fn record(&self, record: &DispatchRecord, processor: Processor) -> DispatchOutcome {
        let entry = OutcomeEntry::from_dispatch(record, processor);

        match self.store.insert(entry).await {
            Ok(InsertOutcome::Inserted) => {
                self.stats.recorded(processor);
                info!(
                    correlation_id = record.correlation_id(),
                    %processor,
                    amount = %record.amount(),
                    "Payment recorded"
                );
                DispatchOutcome::Recorded(processor)
            }
            Ok(InsertOutcome::Duplicate) => {
                self.stats.duplicate();
                debug!(
                    correlation_id = record.correlation_id(),
                    %processor,
                    "Outcome already recorded, keeping the original"
                );
                DispatchOutcome::Duplicate(processor)
            }
            Err(e) => {
                self.stats.store_failure();
                error!(
                    correlation_id = record.correlation_id(),
                    %processor,
                    error = %e,
                    "Payment accepted but outcome not recorded"
                );
                DispatchOutcome::StoreFailed(processor)
            }
        }
    }
}
