//! Wallet Ledger Library
//! # Overview
//!
//! A small ledger of wallets, each holding a non-negative balance, with an
//! HTTP API for moving funds between them and reading recent transfers.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Wallet, Transaction, LedgerError)
//! - [`core`] - Business logic components:
//!   - [`core::traits`] - Wallet and transaction store abstractions
//!   - [`core::engine`] - Transfer orchestration with optimistic retries
//!   - [`core::wallet_service`] - Wallet creation, provisioning and reads
//!   - [`core::memory`] - In-process stores
//! - [`persistence`] - SQLite-backed stores
//! - [`api`] - axum router and handlers
//! - [`io`] - CSV export
//! - [`cli`] - CLI arguments parsing
//! - [`logging`] - tracing subscriber setup
//!
//! # Transfers
//!
//! A transfer debits the sender and credits the recipient as one atomic,
//! version-checked commit, then appends a record to the transaction log.
//! Concurrent transfers touching the same wallets never lose an update:
//! a conflicting commit is rejected and the transfer re-reads and retries.
//!
//! # Invariants
//!
//! - Balances never go negative
//! - The sum of all balances is unchanged by transfers
//! - Transaction ids are unique and increase in commit order

pub mod api;
pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod persistence;
pub mod types;

pub use core::{
    Ledger, MemoryTransactionStore, MemoryWalletStore, TransactionStore, TransferEngine,
    WalletService, WalletStore,
};
pub use io::write_wallets_csv;
pub use persistence::SqliteStore;
pub use types::{Address, LedgerError, NewTransaction, Transaction, TransactionId, Wallet};
