//! Types module
//!
//! Contains core data structures used throughout the application:
//! - `wallet`: Wallet state and address rules
//! - `transaction`: Recorded transfers and identifiers
//! - `error`: Error types for the ledger

pub mod error;
pub mod transaction;
pub mod wallet;

pub use error::LedgerError;
pub use transaction::{NewTransaction, Transaction, TransactionId};
pub use wallet::{validate_address, Address, Wallet, MAX_ADDRESS_LEN};
