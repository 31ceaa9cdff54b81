//! Wallet creation, provisioning and balance reads
//!
//! This module provides the `WalletService`, which owns every wallet operation
//! that is not a transfer:
//! - Creating single wallets and batches of randomly addressed wallets
//! - One-time provisioning of base wallets at start-up
//! - Balance lookup and full listing
//!
//! # Provisioning
//!
//! `ensure_base_wallets` refuses to run once any wallet exists, so calling it
//! on every process start seeds the store exactly once. Batch creation stops
//! at the first failed insert and reports it; wallets created before the
//! failure are kept.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::core::address::{AddressGenerator, HexAddressGenerator};
use crate::core::traits::WalletStore;
use crate::types::{validate_address, LedgerError, Wallet};

/// Wallet operations other than transfers
#[derive(Clone)]
pub struct WalletService {
    store: Arc<dyn WalletStore>,
    generator: Arc<dyn AddressGenerator>,
}

impl std::fmt::Debug for WalletService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletService").finish_non_exhaustive()
    }
}

impl WalletService {
    /// Create a service that generates random hex addresses
    pub fn new(store: Arc<dyn WalletStore>) -> Self {
        Self::with_generator(store, Arc::new(HexAddressGenerator))
    }

    /// Create a service with a custom address source
    pub fn with_generator(
        store: Arc<dyn WalletStore>,
        generator: Arc<dyn AddressGenerator>,
    ) -> Self {
        Self { store, generator }
    }

    /// Insert a single wallet
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` - Empty or over-length address, or negative balance
    /// * `DuplicateAddress` - The address is already taken
    pub fn create_wallet(&self, wallet: Wallet) -> Result<(), LedgerError> {
        validate_address(&wallet.address)?;
        if wallet.balance < Decimal::ZERO {
            return Err(LedgerError::invalid_argument("balance must not be negative"));
        }
        self.store.create(&wallet)?;
        debug!(address = %wallet.address, balance = %wallet.balance, "wallet created");
        Ok(())
    }

    /// Balance of the wallet at `address`
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` - Empty or over-length address
    /// * `WalletNotFound` - No wallet at that address
    pub fn get_balance(&self, address: &str) -> Result<Decimal, LedgerError> {
        validate_address(address)?;
        Ok(self.store.get(address)?.balance)
    }

    /// Every wallet, in no particular order
    pub fn list_wallets(&self) -> Result<Vec<Wallet>, LedgerError> {
        self.store.get_all()
    }

    /// Create `count` wallets with generated addresses and the same balance
    ///
    /// Stops at the first failure and returns it.
    pub fn create_random_wallets(
        &self,
        count: usize,
        balance: Decimal,
    ) -> Result<Vec<Wallet>, LedgerError> {
        let mut created = Vec::with_capacity(count);
        for _ in 0..count {
            let wallet = Wallet::new(self.generator.generate(), balance);
            self.create_wallet(wallet.clone())?;
            created.push(wallet);
        }
        Ok(created)
    }

    /// Seed `count` base wallets unless the store already holds any wallet
    ///
    /// # Errors
    ///
    /// * `AlreadyProvisioned` - At least one wallet exists; nothing is created
    /// * Any error from wallet creation, on the first failure
    pub fn ensure_base_wallets(
        &self,
        count: usize,
        balance: Decimal,
    ) -> Result<Vec<Wallet>, LedgerError> {
        if self.store.exists_any()? {
            return Err(LedgerError::AlreadyProvisioned);
        }
        let created = self.create_random_wallets(count, balance)?;
        info!(count = created.len(), %balance, "base wallets provisioned");
        Ok(created)
    }
}
