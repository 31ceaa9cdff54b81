//! Mapping of ledger errors onto HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, error};

use crate::types::LedgerError;

use super::handlers::StatusResponse;

/// Error returned by every handler
#[derive(Debug)]
pub enum ApiError {
    /// Request rejected at the boundary before reaching the ledger
    BadRequest(String),
    /// Failure inside the ledger
    Ledger(LedgerError),
    /// Failure of the serving machinery itself
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    /// Status code for this error
    ///
    /// Client-input errors map to 400, missing wallets to 404, everything
    /// else to 500.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Ledger(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Ledger(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            ApiError::Ledger(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::BadRequest(message) | ApiError::Internal(message) => message.clone(),
            ApiError::Ledger(e) => e.to_string(),
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(error: LedgerError) -> Self {
        ApiError::Ledger(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            debug!(%status, %message, "request rejected");
        }
        (status, Json(StatusResponse::error(message))).into_response()
    }
}
