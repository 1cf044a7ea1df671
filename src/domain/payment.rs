use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::error::DomainError;

/// Which downstream processor handled a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Processor {
    Default,
    Fallback,
}

impl Processor {
    /// Dispatch order: default first, then fallback
    pub const ALL: [Processor; 2] = [Processor::Default, Processor::Fallback];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Processor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Processor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "fallback" => Ok(Self::Fallback),
            other => Err(DomainError::UnknownProcessor(other.to_string())),
        }
    }
}

/// Validated payment as admitted at intake. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    correlation_id: String,
    amount: Amount,
}

impl PaymentRequest {
    /// Create a payment request, rejecting an empty correlation id
    pub fn new(correlation_id: impl Into<String>, amount: Amount) -> Result<Self, DomainError> {
        let correlation_id = correlation_id.into();
        if correlation_id.trim().is_empty() {
            return Err(DomainError::EmptyCorrelationId);
        }
        Ok(Self {
            correlation_id,
            amount,
        })
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

/// A worker's working copy of a payment, stamped when processing begins.
///
/// Serializes to the downstream processor payload:
/// `{"correlationId": .., "amount": .., "requestedAt": ..}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRecord {
    #[serde(flatten)]
    request: PaymentRequest,
    requested_at: DateTime<Utc>,
}

impl DispatchRecord {
    /// Stamp a request with the moment a worker picked it up
    pub fn stamp(request: PaymentRequest, requested_at: DateTime<Utc>) -> Self {
        Self {
            request,
            requested_at,
        }
    }

    pub fn correlation_id(&self) -> &str {
        self.request.correlation_id()
    }

    pub fn amount(&self) -> Amount {
        self.request.amount()
    }

    pub fn requested_at(&self) -> DateTime<Utc> {
        self.requested_at
    }

    /// Release the original request, e.g. for requeueing
    pub fn into_request(self) -> PaymentRequest {
        self.request
    }
}

/// Persisted result of a successful dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeEntry {
    pub correlation_id: String,
    pub amount: Amount,
    pub processor: Processor,
    pub requested_at: DateTime<Utc>,
}

impl OutcomeEntry {
    pub fn new(
        correlation_id: impl Into<String>,
        amount: Amount,
        processor: Processor,
        requested_at: DateTime<Utc>,
    ) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            amount,
            processor,
            requested_at,
        }
    }

    /// Outcome for a record accepted by `processor`
    pub fn from_dispatch(record: &DispatchRecord, processor: Processor) -> Self {
        Self::new(
            record.correlation_id(),
            record.amount(),
            processor,
            record.requested_at(),
        )
    }
}
