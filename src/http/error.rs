use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::domain::DomainError;
use crate::engine::EngineError;
use crate::queue::AdmissionError;
use crate::storage::StorageError;

/// Errors a handler can answer with
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Invalid payment: {0}")]
    Domain(#[from] DomainError),

    #[error("Service overloaded: {0}")]
    Admission(#[from] AdmissionError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Domain(_) => StatusCode::BAD_REQUEST,
            Self::Admission(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Engine(_) | Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
