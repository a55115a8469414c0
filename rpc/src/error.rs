//! RPC error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use zkid_ledger::LedgerError;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("server error: {0}")]
    Server(String),
}

impl RpcError {
    /// Machine-readable code placed next to the message on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::NotFound(_) => "not_found",
            Self::Ledger(e) => e.code(),
            Self::Metrics(_) => "metrics",
            Self::Server(_) => "server",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Ledger(e) if e.is_permanent() => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Ledger(_) | Self::Metrics(_) | Self::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<std::io::Error> for RpcError {
    fn from(e: std::io::Error) -> Self {
        RpcError::Server(e.to_string())
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.to_string(),
            "code": self.code(),
        });
        (self.status(), Json(body)).into_response()
    }
}
