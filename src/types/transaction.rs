//! Transaction-related types for the wallet ledger
//!
//! A transaction is an immutable record of a completed transfer. The store
//! assigns its identifier; callers only ever build a [`NewTransaction`].

use super::wallet::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction identifier
///
/// Assigned by the transaction store, starting at 1 and strictly increasing.
pub type TransactionId = i64;

/// Recorded transfer
///
/// Append-only: never updated or deleted once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Store-assigned identifier
    pub id: TransactionId,

    /// Sender address
    pub from: Address,

    /// Recipient address
    pub to: Address,

    /// Transferred amount (always positive)
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Transfer record awaiting an identifier
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub from: Address,
    pub to: Address,
    pub amount: Decimal,
}

impl NewTransaction {
    /// Attach a store-assigned identifier
    pub fn into_transaction(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            from: self.from,
            to: self.to,
            amount: self.amount,
        }
    }
}
