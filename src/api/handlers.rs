//! Request handlers
//!
//! Handlers validate what the HTTP layer can see (missing fields, malformed
//! query parameters) and hand the rest to the ledger on the blocking pool,
//! since every store call is blocking I/O.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{LedgerError, Transaction, Wallet};

use super::error::ApiError;
use super::AppState;

/// Body of `POST /api/send`
///
/// Missing fields default to empty values so they are reported as a
/// validation failure rather than a parse failure.
#[derive(Debug, Clone, Deserialize)]
pub struct TransferRequest {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Generic status envelope for acknowledgements and errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

impl StatusResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}

/// Query of `GET /api/transactions`
#[derive(Debug, Deserialize)]
pub struct CountQuery {
    pub count: Option<String>,
}

/// Run blocking ledger work off the async executor
async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, LedgerError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Internal(format!("ledger worker failed: {}", e)))?
        .map_err(ApiError::from)
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `POST /api/send`
pub async fn send(
    State(state): State<AppState>,
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    if request.from.is_empty() || request.to.is_empty() || request.amount <= Decimal::ZERO {
        return Err(ApiError::bad_request(
            "missing required fields or invalid amount",
        ));
    }

    let engine = state.ledger.transfers.clone();
    run_blocking(move || engine.transfer_funds(&request.from, &request.to, request.amount))
        .await?;

    Ok(Json(StatusResponse::success("Transaction completed")))
}

/// `GET /api/transactions?count=N`
pub async fn get_last(
    State(state): State<AppState>,
    Query(query): Query<CountQuery>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let raw = query
        .count
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::bad_request("count parameter is required"))?;
    let count = raw
        .parse::<i64>()
        .ok()
        .filter(|c| *c > 0)
        .and_then(|c| usize::try_from(c).ok())
        .ok_or_else(|| ApiError::bad_request("count must be a positive integer"))?;

    let engine = state.ledger.transfers.clone();
    let transactions = run_blocking(move || engine.get_last_transactions(count)).await?;
    Ok(Json(transactions))
}

/// `GET /api/wallet/:address/balance`
pub async fn get_balance(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<Wallet>, ApiError> {
    let wallets = state.ledger.wallets.clone();
    let lookup = address.clone();
    let balance = run_blocking(move || wallets.get_balance(&lookup)).await?;
    Ok(Json(Wallet::new(address, balance)))
}

/// `GET /api/wallets`
pub async fn list_wallets(State(state): State<AppState>) -> Result<Json<Vec<Wallet>>, ApiError> {
    let wallets = state.ledger.wallets.clone();
    let mut all = run_blocking(move || wallets.list_wallets()).await?;
    all.sort_by(|a, b| a.address.cmp(&b.address));
    Ok(Json(all))
}
