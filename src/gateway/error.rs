use std::time::Duration;

use thiserror::Error;

use crate::domain::Processor;

/// Failed round-trip to a payment processor
///
/// The dispatcher treats every variant the same way (try the next hop);
/// the distinction only feeds logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Processor {processor} timed out after {after:?}")]
    Timeout { processor: Processor, after: Duration },

    #[error("Processor {processor} unreachable: {message}")]
    Transport { processor: Processor, message: String },

    #[error("Processor {processor} answered with status {status}")]
    Status { processor: Processor, status: u16 },
}

impl GatewayError {
    pub fn processor(&self) -> Processor {
        match self {
            Self::Timeout { processor, .. }
            | Self::Transport { processor, .. }
            | Self::Status { processor, .. } => *processor,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
