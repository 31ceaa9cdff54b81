//! Wallet-related types for the wallet ledger
//!
//! This module defines the Wallet structure, the address alias and the
//! address validation rules shared by the engine and the HTTP boundary.

use super::error::LedgerError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Wallet address
///
/// Opaque unique identifier. Generated addresses are 64 lowercase hex characters.
pub type Address = String;

/// Maximum accepted address length in characters
pub const MAX_ADDRESS_LEN: usize = 64;

/// Wallet state
///
/// A wallet is keyed by its address and holds a single non-negative balance.
/// Wallets are created once (by provisioning or direct creation), mutated only
/// by the transfer engine and never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    /// Primary key, unique across the store
    pub address: Address,

    /// Current balance
    ///
    /// Never negative in any committed state. Serialized over HTTP as a
    /// JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,

    /// Optimistic concurrency counter
    ///
    /// Bumped by the store on every successful write. A version-checked commit
    /// only succeeds while the stored version still equals this value.
    #[serde(skip)]
    pub version: u64,
}

impl Wallet {
    /// Create a wallet that has never been written (version 0)
    pub fn new(address: impl Into<Address>, balance: Decimal) -> Self {
        Wallet {
            address: address.into(),
            balance,
            version: 0,
        }
    }
}

/// Validate an address supplied by a caller
///
/// # Errors
///
/// Returns `InvalidArgument` when the address is empty or longer than
/// [`MAX_ADDRESS_LEN`] characters.
pub fn validate_address(address: &str) -> Result<(), LedgerError> {
    if address.is_empty() {
        return Err(LedgerError::invalid_argument("address must not be empty"));
    }
    if address.chars().count() > MAX_ADDRESS_LEN {
        return Err(LedgerError::invalid_argument(format!(
            "address longer than {} characters",
            MAX_ADDRESS_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_new_wallet_starts_at_version_zero() {
        let wallet = Wallet::new("abc", Decimal::new(100, 0));

        assert_eq!(wallet.address, "abc");
        assert_eq!(wallet.balance, Decimal::new(100, 0));
        assert_eq!(wallet.version, 0);
    }

    #[rstest]
    #[case::single_char("a")]
    #[case::max_length(&"f".repeat(MAX_ADDRESS_LEN))]
    fn test_validate_address_accepts(#[case] address: &str) {
        assert!(validate_address(address).is_ok());
    }

    #[rstest]
    #[case::empty("")]
    #[case::too_long(&"f".repeat(MAX_ADDRESS_LEN + 1))]
    fn test_validate_address_rejects(#[case] address: &str) {
        assert!(matches!(
            validate_address(address),
            Err(LedgerError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_wallet_json_omits_version() {
        let mut wallet = Wallet::new("abc", Decimal::new(895, 1));
        wallet.version = 7;

        let json = serde_json::to_value(&wallet).unwrap();

        assert_eq!(json, serde_json::json!({ "address": "abc", "balance": 89.5 }));
    }
}
