use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::error::ApiError;
use crate::domain::{Amount, PaymentRequest};

/// Intake body as received. Unknown fields (e.g. a misspelled `ammount`) are rejected.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawPayment {
    #[serde(rename = "correlationId")]
    pub correlation_id: Option<String>,
    pub amount: Option<f64>,
}

impl RawPayment {
    /// Validate into a strongly-typed PaymentRequest
    pub fn parse(self) -> Result<PaymentRequest, ApiError> {
        let correlation_id = self
            .correlation_id
            .ok_or_else(|| ApiError::BadRequest("missing field: correlationId".to_string()))?;
        let amount = self
            .amount
            .ok_or_else(|| ApiError::BadRequest("missing field: amount".to_string()))?;

        Ok(PaymentRequest::new(correlation_id, Amount::from_f64(amount)?)?)
    }
}

/// `GET /payments-summary` query string
#[derive(Debug, Default, Deserialize)]
pub struct SummaryParams {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl SummaryParams {
    /// Parse both bounds; absent or empty means open
    pub fn parse(&self) -> Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>), ApiError> {
        Ok((
            parse_bound("from", self.from.as_deref())?,
            parse_bound("to", self.to.as_deref())?,
        ))
    }
}

fn parse_bound(name: &str, value: Option<&str>) -> Result<Option<DateTime<Utc>>, ApiError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| {
                ApiError::BadRequest(format!(
                    "'{name}' must be an RFC3339 timestamp (e.g. 2020-07-10T12:34:56Z): {e}"
                ))
            }),
    }
}
