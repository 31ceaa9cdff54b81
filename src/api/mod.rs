//! HTTP interface
//!
//! Builds the axum router over a [`Ledger`]. All endpoints share the ledger
//! through axum's `State` extractor.
//!
//! ## Endpoints
//!
//! | Method | Path                           | Description                      |
//! |--------|--------------------------------|----------------------------------|
//! | GET    | `/health`                      | Liveness probe                   |
//! | POST   | `/api/send`                    | Transfer funds between wallets   |
//! | GET    | `/api/transactions?count=N`    | N most recent transfers          |
//! | GET    | `/api/wallet/:address/balance` | Balance of one wallet            |
//! | GET    | `/api/wallets`                 | Every wallet, sorted by address  |

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::core::Ledger;

pub mod error;
pub mod handlers;

pub use error::ApiError;
pub use handlers::{StatusResponse, TransferRequest};

/// Shared state available to all request handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub ledger: Ledger,
}

/// Build the router with every route and request tracing
pub fn create_router(ledger: Ledger) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/send", post(handlers::send))
        .route("/api/transactions", get(handlers::get_last))
        .route("/api/wallet/:address/balance", get(handlers::get_balance))
        .route("/api/wallets", get(handlers::list_wallets))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { ledger })
}
