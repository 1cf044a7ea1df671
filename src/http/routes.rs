use axum::Router;
use axum::routing::{get, post};

use super::handlers;
use crate::app::AppContext;

/// Build the service router over a shared context
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/payments", post(handlers::create_payment))
        .route("/payments-summary", get(handlers::payments_summary))
        .route("/purge-payments", post(handlers::purge_payments))
        .route("/health", get(handlers::health))
        .route("/stats", get(handlers::stats))
        .with_state(ctx)
}
