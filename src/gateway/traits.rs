use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::error::GatewayError;
use crate::domain::{DispatchRecord, Processor};

/// Client for the downstream payment processors
///
/// One call is one bounded round-trip; retry and fallback routing belong
/// to the caller.
#[async_trait]
pub trait ProcessorGateway: Send + Sync {
    /// Submit `record` to `processor`, failing if no answer arrives within `timeout`
    async fn send(
        &self,
        processor: Processor,
        record: &DispatchRecord,
        timeout: Duration,
    ) -> Result<(), GatewayError>;
}

#[async_trait]
impl<G: ProcessorGateway + ?Sized> ProcessorGateway for Arc<G> {
    async fn send(
        &self,
        processor: Processor,
        record: &DispatchRecord,
        timeout: Duration,
    ) -> Result<(), GatewayError> {
        (**self).send(processor, record, timeout).await
    }
}
