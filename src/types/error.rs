//! Error types for the wallet ledger
//!
//! This module defines every error the ledger core can surface. The HTTP
//! boundary maps them onto status codes; nothing in the core recovers from
//! them locally except the engine, which retries `VersionConflict`.
//!
//! # Error Categories
//!
//! - **Not found**: sender, recipient or a looked-up wallet is absent
//! - **Client input**: invalid arguments, insufficient funds
//! - **Bootstrap**: wallets already provisioned, duplicate address
//! - **Concurrency**: version conflicts and exhausted transfer retries
//! - **Storage**: any failure of the backing store

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the wallet ledger
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Sender wallet does not exist
    #[error("sender wallet not found: {address}")]
    SenderNotFound { address: String },

    /// Recipient wallet does not exist
    #[error("recipient wallet not found: {address}")]
    RecipientNotFound { address: String },

    /// Wallet looked up by address does not exist
    #[error("wallet not found: {address}")]
    WalletNotFound { address: String },

    /// Sender balance is lower than the requested amount
    ///
    /// The transfer is rejected and no balance is touched.
    #[error("insufficient funds in {address}: available {available}, requested {requested}")]
    InsufficientFunds {
        address: String,
        available: Decimal,
        requested: Decimal,
    },

    /// Caller-supplied input is unusable
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A wallet with this address already exists
    #[error("wallet already exists: {address}")]
    DuplicateAddress { address: String },

    /// Base wallets were already created by an earlier start
    #[error("wallets already provisioned")]
    AlreadyProvisioned,

    /// Wallet changed between read and version-checked write
    ///
    /// Retried by the transfer engine; never reaches HTTP callers directly.
    #[error("wallet {address} was modified concurrently")]
    VersionConflict { address: String },

    /// Transfer kept losing version races and gave up
    #[error("transfer abandoned after {attempts} conflicting attempts")]
    TransferContention { attempts: u32 },

    /// Balance arithmetic would overflow
    #[error("arithmetic overflow crediting {address}")]
    ArithmeticOverflow { address: String },

    /// Backing store failed or is unreachable
    #[error("storage error: {message}")]
    Storage { message: String },
}

impl From<rusqlite::Error> for LedgerError {
    fn from(error: rusqlite::Error) -> Self {
        LedgerError::Storage {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    pub fn sender_not_found(address: &str) -> Self {
        LedgerError::SenderNotFound {
            address: address.to_string(),
        }
    }

    pub fn recipient_not_found(address: &str) -> Self {
        LedgerError::RecipientNotFound {
            address: address.to_string(),
        }
    }

    pub fn wallet_not_found(address: &str) -> Self {
        LedgerError::WalletNotFound {
            address: address.to_string(),
        }
    }

    pub fn insufficient_funds(address: &str, available: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            address: address.to_string(),
            available,
            requested,
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        LedgerError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn duplicate_address(address: &str) -> Self {
        LedgerError::DuplicateAddress {
            address: address.to_string(),
        }
    }

    pub fn version_conflict(address: &str) -> Self {
        LedgerError::VersionConflict {
            address: address.to_string(),
        }
    }

    pub fn arithmetic_overflow(address: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            address: address.to_string(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        LedgerError::Storage {
            message: message.into(),
        }
    }

    /// Whether the error names a missing wallet
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LedgerError::SenderNotFound { .. }
                | LedgerError::RecipientNotFound { .. }
                | LedgerError::WalletNotFound { .. }
        )
    }

    /// Whether the error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            LedgerError::InvalidArgument { .. } | LedgerError::InsufficientFunds { .. }
        )
    }
}
