//! Ledger composition root
//!
//! Bundles the wallet service and the transfer engine over one pair of stores.
//! There is no process-wide instance; whoever owns the stores builds a
//! `Ledger` and hands clones to the HTTP layer.

use std::sync::Arc;

use crate::core::engine::TransferEngine;
use crate::core::traits::{TransactionStore, WalletStore};
use crate::core::wallet_service::WalletService;

/// Wallet and transfer capabilities over shared stores
#[derive(Debug, Clone)]
pub struct Ledger {
    pub wallets: WalletService,
    pub transfers: TransferEngine,
}

impl Ledger {
    pub fn new(wallets: Arc<dyn WalletStore>, transactions: Arc<dyn TransactionStore>) -> Self {
        Self {
            wallets: WalletService::new(Arc::clone(&wallets)),
            transfers: TransferEngine::new(wallets, transactions),
        }
    }

    /// Set the transfer retry budget
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.transfers = self.transfers.with_max_attempts(max_attempts);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::memory::{MemoryTransactionStore, MemoryWalletStore};
    use rust_decimal::Decimal;

    #[test]
    fn test_services_share_stores() {
        let ledger = Ledger::new(
            Arc::new(MemoryWalletStore::new()),
            Arc::new(MemoryTransactionStore::new()),
        )
        .with_max_attempts(8);

        let created = ledger
            .wallets
            .ensure_base_wallets(2, Decimal::new(100, 0))
            .unwrap();
        ledger
            .transfers
            .transfer_funds(&created[0].address, &created[1].address, Decimal::new(40, 0))
            .unwrap();

        assert_eq!(
            ledger.wallets.get_balance(&created[0].address),
            Ok(Decimal::new(60, 0))
        );
        assert_eq!(
            ledger.wallets.get_balance(&created[1].address),
            Ok(Decimal::new(140, 0))
        );
        assert_eq!(ledger.transfers.get_last_transactions(10).unwrap().len(), 1);
        assert_eq!(ledger.transfers.max_attempts(), 8);
    }
}
