//! Core traits for wallet and transaction persistence
//!
//! The engine only talks to storage through these two traits, so in-process
//! stores and the SQLite store can be swapped freely. Both traits are blocking;
//! async callers are expected to run them on a blocking pool.

use crate::types::{LedgerError, NewTransaction, Transaction, Wallet};

/// Persistent mapping from address to wallet
pub trait WalletStore: Send + Sync {
    /// Insert a new wallet
    ///
    /// Fails with `DuplicateAddress` if the address is already taken.
    fn create(&self, wallet: &Wallet) -> Result<(), LedgerError>;

    /// Overwrite the balance of an existing wallet and bump its version
    ///
    /// Fails with `WalletNotFound` when no row was affected.
    fn update(&self, wallet: &Wallet) -> Result<(), LedgerError>;

    /// Look up a wallet by address
    fn get(&self, address: &str) -> Result<Wallet, LedgerError>;

    /// Every wallet, in no particular order
    fn get_all(&self) -> Result<Vec<Wallet>, LedgerError>;

    /// Whether at least one wallet exists
    fn exists_any(&self) -> Result<bool, LedgerError>;

    /// Atomically write several wallets, checking each one's version
    ///
    /// Either every wallet still has the version it was read at and all of them
    /// are written (versions bumped), or nothing is written and the call fails
    /// with `VersionConflict` (or `WalletNotFound` if a row disappeared).
    fn commit(&self, wallets: &[Wallet]) -> Result<(), LedgerError>;
}

/// Append-only log of completed transfers
pub trait TransactionStore: Send + Sync {
    /// Append a record; the store assigns the identifier
    fn create(&self, transaction: NewTransaction) -> Result<Transaction, LedgerError>;

    /// Up to `count` most recent records, newest first
    fn get_last(&self, count: usize) -> Result<Vec<Transaction>, LedgerError>;
}
