//! Core business logic module
//!
//! This module contains the ledger components:
//! - `traits` - Store abstractions the engine is written against
//! - `engine` - Funds transfer orchestration
//! - `wallet_service` - Wallet creation, provisioning and balance reads
//! - `ledger` - Composition of the two services over shared stores
//! - `address` - Wallet address generation
//! - `memory` - In-process store implementations

pub mod address;
pub mod engine;
pub mod ledger;
pub mod memory;
pub mod traits;
pub mod wallet_service;

pub use address::{AddressGenerator, HexAddressGenerator};
pub use engine::{TransferEngine, TransferReceipt, DEFAULT_MAX_ATTEMPTS};
pub use ledger::Ledger;
pub use memory::{MemoryTransactionStore, MemoryWalletStore};
pub use traits::{TransactionStore, WalletStore};
pub use wallet_service::WalletService;
