use chrono::{DateTime, Utc};

use super::error::EngineError;
use crate::domain::{PaymentsSummary, TimeWindow};
use crate::storage::OutcomeStore;

/// Read path: reduce stored outcomes to per-processor totals
pub struct SummaryAggregator<S: OutcomeStore> {
    store: S,
}

impl<S: OutcomeStore> SummaryAggregator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Totals for outcomes with `from <= requested_at <= to`.
    /// An empty window yields zero totals.
    pub async fn summarize(&self, window: TimeWindow) -> Result<PaymentsSummary, EngineError> {
        let entries = self.store.query_range(window).await?;

        let mut summary = PaymentsSummary::default();
        for entry in &entries {
            summary.record(entry)?;
        }
        Ok(summary)
    }

    /// Like [`summarize`](Self::summarize) with open bounds filled in at call time
    pub async fn summarize_between(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<PaymentsSummary, EngineError> {
        self.summarize(TimeWindow::resolve(from, to, Utc::now())).await
    }
}
