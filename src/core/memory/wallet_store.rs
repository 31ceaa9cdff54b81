//! Thread-safe in-memory wallet store
//!
//! This module provides `MemoryWalletStore`, a `WalletStore` backed by
//! `DashMap` so that reads of different wallets never contend.
//!
//! # Thread Safety
//!
//! Single-entry reads go straight to the map. Every write that must observe a
//! consistent version (`update` and `commit`) additionally holds the write
//! gate, so a version check and the writes that follow it cannot interleave
//! with another writer. Entry guards are never held two at a time, which keeps
//! DashMap's per-shard locks deadlock free.

use crate::core::traits::WalletStore;
use crate::types::{LedgerError, Wallet};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;

/// In-memory wallet store
#[derive(Debug, Default)]
pub struct MemoryWalletStore {
    /// Wallets by address
    wallets: DashMap<String, Wallet>,

    /// Serializes version-checked writes
    write_gate: Mutex<()>,
}

impl MemoryWalletStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored wallets
    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }
}

impl WalletStore for MemoryWalletStore {
    fn create(&self, wallet: &Wallet) -> Result<(), LedgerError> {
        match self.wallets.entry(wallet.address.clone()) {
            Entry::Occupied(_) => Err(LedgerError::duplicate_address(&wallet.address)),
            Entry::Vacant(slot) => {
                slot.insert(wallet.clone());
                Ok(())
            }
        }
    }

    fn update(&self, wallet: &Wallet) -> Result<(), LedgerError> {
        let _gate = self.write_gate.lock();
        let mut stored = self
            .wallets
            .get_mut(&wallet.address)
            .ok_or_else(|| LedgerError::wallet_not_found(&wallet.address))?;
        stored.balance = wallet.balance;
        stored.version += 1;
        Ok(())
    }

    fn get(&self, address: &str) -> Result<Wallet, LedgerError> {
        self.wallets
            .get(address)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| LedgerError::wallet_not_found(address))
    }

    fn get_all(&self) -> Result<Vec<Wallet>, LedgerError> {
        Ok(self
            .wallets
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    fn exists_any(&self) -> Result<bool, LedgerError> {
        Ok(!self.wallets.is_empty())
    }

    fn commit(&self, wallets: &[Wallet]) -> Result<(), LedgerError> {
        let mut ordered: Vec<&Wallet> = wallets.iter().collect();
        ordered.sort_by(|a, b| a.address.cmp(&b.address));

        let _gate = self.write_gate.lock();

        // Validate every version before touching anything
        for wallet in &ordered {
            let stored = self
                .wallets
                .get(&wallet.address)
                .ok_or_else(|| LedgerError::wallet_not_found(&wallet.address))?;
            if stored.version != wallet.version {
                return Err(LedgerError::version_conflict(&wallet.address));
            }
        }

        for wallet in ordered {
            if let Some(mut stored) = self.wallets.get_mut(&wallet.address) {
                stored.balance = wallet.balance;
                stored.version += 1;
            }
        }

        Ok(())
    }
}
