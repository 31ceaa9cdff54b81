//! Funds transfer orchestration
//!
//! This module provides the `TransferEngine`, the only component that
//! mutates wallet balances and the only one that correlates the wallet and
//! transaction stores.
//!
//! # Transfer protocol
//!
//! 1. Read the sender; absent means `SenderNotFound`
//! 2. Reject with `InsufficientFunds` if the sender balance is below the amount
//! 3. Read the recipient; absent means `RecipientNotFound`
//! 4. Compute the debit and credit in memory with checked arithmetic
//! 5. Commit both wallets in one version-checked write
//! 6. Append the transaction record
//!
//! Step 5 fails with `VersionConflict` when either wallet changed after it was
//! read. Nothing was written in that case, so steps 1-5 are simply run again
//! on fresh reads, up to `max_attempts` times. A concurrent transfer can
//! therefore never compute from a stale balance, and the sufficiency check is
//! always made against the balance that is actually overwritten.
//!
//! Step 6 happens after the funds have moved. If the append fails the
//! transfer still succeeds; the failure is logged and the receipt carries no
//! transaction.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::core::traits::{TransactionStore, WalletStore};
use crate::types::{validate_address, LedgerError, NewTransaction, Transaction, Wallet};

/// Default number of read-check-commit cycles before a transfer gives up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 64;

/// Outcome of a successful transfer
#[derive(Debug, Clone, PartialEq)]
pub struct TransferReceipt {
    pub from: String,
    pub to: String,
    pub amount: Decimal,

    /// The appended record, or `None` if the append failed after the balances
    /// were committed
    pub transaction: Option<Transaction>,

    /// Number of commit attempts it took (1 when uncontended)
    pub attempts: u32,
}

/// Transfer orchestrator
///
/// Cheap to clone; every clone shares the same stores.
#[derive(Clone)]
pub struct TransferEngine {
    wallets: Arc<dyn WalletStore>,
    transactions: Arc<dyn TransactionStore>,
    max_attempts: u32,
}

impl std::fmt::Debug for TransferEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferEngine")
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}

impl TransferEngine {
    /// Create an engine over the given stores with the default retry budget
    pub fn new(wallets: Arc<dyn WalletStore>, transactions: Arc<dyn TransactionStore>) -> Self {
        Self {
            wallets,
            transactions,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Override the retry budget (values below 1 are treated as 1)
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Move `amount` from `from` to `to`
    ///
    /// # Returns
    ///
    /// * `Ok(TransferReceipt)` - Both balances are committed
    /// * `Err(LedgerError::InvalidArgument)` - Empty or over-length address,
    ///   non-positive amount, or `from == to`
    /// * `Err(LedgerError::SenderNotFound)` - No wallet at `from`; nothing else was read
    /// * `Err(LedgerError::InsufficientFunds)` - Sender balance below `amount`
    /// * `Err(LedgerError::RecipientNotFound)` - No wallet at `to`
    /// * `Err(LedgerError::ArithmeticOverflow)` - Credit would overflow
    /// * `Err(LedgerError::TransferContention)` - Every attempt lost a version race
    /// * `Err(LedgerError::Storage)` - The wallet store failed
    ///
    /// No error leaves a balance changed.
    pub fn transfer_funds(
        &self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<TransferReceipt, LedgerError> {
        validate_address(from)?;
        validate_address(to)?;
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_argument("amount must be positive"));
        }
        if from == to {
            return Err(LedgerError::invalid_argument(
                "sender and recipient must differ",
            ));
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_transfer(from, to, amount) {
                Ok(()) => break,
                Err(LedgerError::VersionConflict { address }) => {
                    debug!(from, to, %amount, attempt, conflicted = %address, "transfer lost version race");
                    if attempt >= self.max_attempts {
                        warn!(from, to, %amount, attempts = attempt, "transfer abandoned under contention");
                        return Err(LedgerError::TransferContention { attempts: attempt });
                    }
                    std::thread::yield_now();
                }
                Err(e) => return Err(e),
            }
        }

        let transaction = match self.transactions.create(NewTransaction {
            from: from.to_string(),
            to: to.to_string(),
            amount,
        }) {
            Ok(tx) => Some(tx),
            Err(e) => {
                warn!(from, to, %amount, error = %e, "balances committed but transaction record was not stored");
                None
            }
        };

        info!(from, to, %amount, attempts = attempt, "transfer completed");

        Ok(TransferReceipt {
            from: from.to_string(),
            to: to.to_string(),
            amount,
            transaction,
            attempts: attempt,
        })
    }

    /// One read-check-compute-commit cycle
    fn try_transfer(&self, from: &str, to: &str, amount: Decimal) -> Result<(), LedgerError> {
        let sender = self.wallets.get(from).map_err(|e| match e {
            LedgerError::WalletNotFound { .. } => LedgerError::sender_not_found(from),
            other => other,
        })?;

        if sender.balance < amount {
            return Err(LedgerError::insufficient_funds(from, sender.balance, amount));
        }

        let recipient = self.wallets.get(to).map_err(|e| match e {
            LedgerError::WalletNotFound { .. } => LedgerError::recipient_not_found(to),
            other => other,
        })?;

        let debit = sender
            .balance
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::insufficient_funds(from, sender.balance, amount))?;
        let credit = recipient
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow(to))?;

        let debited = Wallet {
            balance: debit,
            ..sender
        };
        let credited = Wallet {
            balance: credit,
            ..recipient
        };

        self.wallets.commit(&[debited, credited])
    }

    /// Up to `count` most recent transactions, newest first
    ///
    /// Fails with `InvalidArgument` when `count` is zero.
    pub fn get_last_transactions(&self, count: usize) -> Result<Vec<Transaction>, LedgerError> {
        if count == 0 {
            return Err(LedgerError::invalid_argument("count must be positive"));
        }
        self.transactions.get_last(count)
    }
}
