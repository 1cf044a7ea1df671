use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use super::error::GatewayError;
use super::traits::ProcessorGateway;
use crate::domain::{DispatchRecord, Processor};

/// `POST /payments` URLs of the two processors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorEndpoints {
    default: String,
    fallback: String,
}

impl ProcessorEndpoints {
    /// Build from base URLs, e.g. `http://payment-processor-default:8080`
    pub fn from_base_urls(default: &str, fallback: &str) -> Self {
        Self {
            default: payments_url(default),
            fallback: payments_url(fallback),
        }
    }

    pub fn url(&self, processor: Processor) -> &str {
        match processor {
            Processor::Default => &self.default,
            Processor::Fallback => &self.fallback,
        }
    }
}

fn payments_url(base: &str) -> String {
    format!("{}/payments", base.trim_end_matches('/'))
}

/// reqwest-backed gateway. Only `200 OK` counts as accepted.
#[derive(Clone)]
pub struct HttpProcessorGateway {
    client: reqwest::Client,
    endpoints: ProcessorEndpoints,
}

impl HttpProcessorGateway {
    pub fn new(client: reqwest::Client, endpoints: ProcessorEndpoints) -> Self {
        Self { client, endpoints }
    }
}

#[async_trait]
impl ProcessorGateway for HttpProcessorGateway {
    async fn send(
        &self,
        processor: Processor,
        record: &DispatchRecord,
        timeout: Duration,
    ) -> Result<(), GatewayError> {
        let url = self.endpoints.url(processor);
        debug!(%processor, correlation_id = record.correlation_id(), url, "Submitting payment");

        let resp = self
            .client
            .post(url)
            .json(record)
            .timeout(timeout)
            .send()
            .await;

        match resp {
            Ok(r) if r.status() == StatusCode::OK => Ok(()),
            Ok(r) => Err(GatewayError::Status {
                processor,
                status: r.status().as_u16(),
            }),
            Err(e) if e.is_timeout() => Err(GatewayError::Timeout {
                processor,
                after: timeout,
            }),
            Err(e) => Err(GatewayError::Transport {
                processor,
                message: e.to_string(),
            }),
        }
    }
}
