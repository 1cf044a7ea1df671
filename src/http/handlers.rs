use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use tracing::{debug, info};

use super::error::ApiError;
use super::parse::{RawPayment, SummaryParams};
use crate::app::AppContext;
use crate::domain::PaymentsSummary;
use crate::engine::StatsSnapshot;
use crate::storage::OutcomeStore;

/// `POST /payments`: admit without waiting, 503 when the queue is full
pub async fn create_payment(
    State(ctx): State<AppContext>,
    body: Result<Json<RawPayment>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(raw) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let request = raw.parse()?;

    debug!(correlation_id = request.correlation_id(), "Admitting payment");
    match ctx.queue().submit(request) {
        Ok(()) => {
            ctx.stats().accepted();
            Ok(StatusCode::ACCEPTED)
        }
        Err(e) => {
            ctx.stats().rejected();
            debug!(error = %e, "Payment rejected at admission");
            Err(e.into())
        }
    }
}

/// `GET /payments-summary?from=..&to=..`
pub async fn payments_summary(
    State(ctx): State<AppContext>,
    Query(params): Query<SummaryParams>,
) -> Result<Json<PaymentsSummary>, ApiError> {
    let (from, to) = params.parse()?;
    let summary = ctx.summaries().summarize_between(from, to).await?;
    Ok(Json(summary))
}

/// `POST /purge-payments`
pub async fn purge_payments(State(ctx): State<AppContext>) -> Result<String, ApiError> {
    let purged = ctx.store().purge_all().await?;
    info!(purged, "Outcome store purged");
    Ok(format!("purged {purged} payments"))
}

pub async fn health() -> &'static str {
    "ok"
}

/// `GET /stats`
pub async fn stats(State(ctx): State<AppContext>) -> Json<StatsSnapshot> {
    Json(ctx.stats().snapshot())
}
