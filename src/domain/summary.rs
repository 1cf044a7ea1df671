use chrono::{DateTime, Utc};
use serde::Serialize;

use super::amount::Amount;
use super::error::DomainError;
use super::payment::{OutcomeEntry, Processor};

/// Inclusive time window `[from, to]` over `requested_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// Fill open bounds: missing `from` is the minimum representable time,
    /// missing `to` is `now`
    pub fn resolve(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        Self {
            from: from.unwrap_or(DateTime::<Utc>::MIN_UTC),
            to: to.unwrap_or(now),
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from <= at && at <= self.to
    }

    /// An inverted window matches nothing
    pub fn is_empty(&self) -> bool {
        self.from > self.to
    }
}

/// Count and summed amount for one processor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorSummary {
    pub total_requests: u64,
    pub total_amount: Amount,
}

impl ProcessorSummary {
    fn record(&mut self, amount: Amount) -> Result<(), DomainError> {
        self.total_amount = self
            .total_amount
            .checked_add(amount)
            .ok_or(DomainError::Overflow)?;
        self.total_requests += 1;
        Ok(())
    }
}

/// Per-processor totals over a time window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PaymentsSummary {
    pub default: ProcessorSummary,
    pub fallback: ProcessorSummary,
}

impl PaymentsSummary {
    pub fn get(&self, processor: Processor) -> &ProcessorSummary {
        match processor {
            Processor::Default => &self.default,
            Processor::Fallback => &self.fallback,
        }
    }

    /// Fold one outcome into the matching processor bucket
    pub fn record(&mut self, entry: &OutcomeEntry) -> Result<(), DomainError> {
        let bucket = match entry.processor {
            Processor::Default => &mut self.default,
            Processor::Fallback => &mut self.fallback,
        };
        bucket.record(entry.amount)
    }
}
