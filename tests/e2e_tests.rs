//! End-to-end integration tests
//!
//! These tests drive the ledger through predefined CSV fixtures. Each test:
//! 1. Seeds wallets from wallets.csv
//! 2. Runs every row of transfers.csv through the transfer engine and checks
//!    the row's expected outcome
//! 3. Exports the final wallet state as CSV
//! 4. Compares the export with expected.csv
//!
//! Fixtures live in tests/fixtures/ and cover:
//! - Happy path transfers
//! - Insufficient funds
//! - Unknown senders and recipients
//! - Chains of transfers across several wallets
//! - Invalid inputs (zero, negative, self-transfer, empty address)
//!
//! Each fixture runs twice: once over the in-memory stores and once over SQLite.

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal::Decimal;
    use serde::Deserialize;
    use std::fs;
    use std::path::Path;
    use std::str::FromStr;
    use std::sync::Arc;
    use tempfile::TempDir;
    use wallet_ledger::{
        write_wallets_csv, Ledger, LedgerError, MemoryTransactionStore, MemoryWalletStore,
        SqliteStore, Wallet, WalletStore,
    };

    #[derive(Debug, Clone, Copy)]
    enum StoreKind {
        Memory,
        Sqlite,
    }

    #[derive(Debug, Deserialize)]
    struct WalletRow {
        address: String,
        balance: String,
    }

    #[derive(Debug, Deserialize)]
    struct TransferRow {
        from: String,
        to: String,
        amount: String,
        outcome: String,
    }

    /// Ledger over the requested backend
    ///
    /// The returned `TempDir` must outlive the ledger for SQLite.
    fn build_ledger(kind: StoreKind) -> (Ledger, Arc<dyn WalletStore>, Option<TempDir>) {
        match kind {
            StoreKind::Memory => {
                let wallets: Arc<dyn WalletStore> = Arc::new(MemoryWalletStore::new());
                let ledger = Ledger::new(wallets.clone(), Arc::new(MemoryTransactionStore::new()));
                (ledger, wallets, None)
            }
            StoreKind::Sqlite => {
                let dir = TempDir::new().expect("Failed to create temp dir");
                let store = Arc::new(
                    SqliteStore::open(dir.path().join("ledger.db")).expect("Failed to open db"),
                );
                let wallets: Arc<dyn WalletStore> = store.clone();
                let ledger = Ledger::new(store.clone(), store);
                (ledger, wallets, Some(dir))
            }
        }
    }

    fn outcome_of(result: &Result<(), LedgerError>) -> &'static str {
        match result {
            Ok(()) => "ok",
            Err(LedgerError::InsufficientFunds { .. }) => "insufficient_funds",
            Err(LedgerError::SenderNotFound { .. }) => "sender_not_found",
            Err(LedgerError::RecipientNotFound { .. }) => "recipient_not_found",
            Err(LedgerError::InvalidArgument { .. }) => "invalid_argument",
            Err(_) => "other",
        }
    }

    /// Run a fixture and compare the exported wallets with expected.csv
    ///
    /// # Panics
    ///
    /// Panics if a fixture file is missing, a transfer outcome differs from
    /// the one listed, or the final wallet state differs from expected.csv.
    fn run_test_fixture(fixture_name: &str, kind: StoreKind) {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let wallets_path = format!("{}/wallets.csv", fixture_dir);
        let transfers_path = format!("{}/transfers.csv", fixture_dir);
        let expected_path = format!("{}/expected.csv", fixture_dir);

        for path in [&wallets_path, &transfers_path, &expected_path] {
            assert!(Path::new(path).exists(), "Fixture file not found: {}", path);
        }

        let (ledger, store, _dir) = build_ledger(kind);

        let mut reader = csv::Reader::from_path(&wallets_path).expect("Failed to read wallets");
        for row in reader.deserialize::<WalletRow>() {
            let row = row.expect("Malformed wallet row");
            let balance = Decimal::from_str(&row.balance).expect("Malformed balance");
            ledger
                .wallets
                .create_wallet(Wallet::new(row.address, balance))
                .expect("Failed to seed wallet");
        }
        let total_before: Decimal = store.get_all().unwrap().iter().map(|w| w.balance).sum();

        let mut reader =
            csv::Reader::from_path(&transfers_path).expect("Failed to read transfers");
        for (line, row) in reader.deserialize::<TransferRow>().enumerate() {
            let row = row.expect("Malformed transfer row");
            let amount = Decimal::from_str(&row.amount).expect("Malformed amount");
            let result = ledger
                .transfers
                .transfer_funds(&row.from, &row.to, amount)
                .map(|_| ());
            assert_eq!(
                outcome_of(&result),
                row.outcome,
                "Fixture '{}' transfer #{} ({} -> {} {}) returned {:?}",
                fixture_name,
                line + 1,
                row.from,
                row.to,
                row.amount,
                result
            );
        }

        let wallets = store.get_all().unwrap();
        let total_after: Decimal = wallets.iter().map(|w| w.balance).sum();
        assert_eq!(total_before, total_after, "Transfers must conserve the total");

        let mut output = Vec::new();
        write_wallets_csv(&wallets, &mut output).expect("Failed to export wallets");
        let actual = String::from_utf8(output).expect("Export is not UTF-8");
        let expected = fs::read_to_string(&expected_path).expect("Failed to read expected.csv");

        assert_eq!(
            actual.trim(),
            expected.trim(),
            "Output mismatch for fixture '{}' ({:?})",
            fixture_name,
            kind
        );
    }

    #[rstest]
    #[case::happy_path("happy_path")]
    #[case::insufficient_funds("insufficient_funds")]
    #[case::unknown_wallets("unknown_wallets")]
    #[case::transfer_chain("transfer_chain")]
    #[case::invalid_inputs("invalid_inputs")]
    fn test_fixture(
        #[case] fixture_name: &str,
        #[values(StoreKind::Memory, StoreKind::Sqlite)] kind: StoreKind,
    ) {
        run_test_fixture(fixture_name, kind);
    }

    #[rstest]
    fn test_transaction_log_matches_transfers(
        #[values(StoreKind::Memory, StoreKind::Sqlite)] kind: StoreKind,
    ) {
        let (ledger, _, _dir) = build_ledger(kind);
        ledger
            .wallets
            .create_wallet(Wallet::new("a", Decimal::new(100, 0)))
            .unwrap();
        ledger
            .wallets
            .create_wallet(Wallet::new("b", Decimal::ZERO))
            .unwrap();

        for cents in [100, 250, 5] {
            ledger
                .transfers
                .transfer_funds("a", "b", Decimal::new(cents, 2))
                .unwrap();
        }
        // Rejected transfers leave no record
        let _ = ledger.transfers.transfer_funds("b", "a", Decimal::new(1000, 0));

        let log = ledger.transfers.get_last_transactions(10).unwrap();
        let amounts: Vec<Decimal> = log.iter().map(|t| t.amount).collect();
        assert_eq!(
            amounts,
            vec![Decimal::new(5, 2), Decimal::new(250, 2), Decimal::new(100, 2)]
        );
        assert!(log.windows(2).all(|pair| pair[0].id > pair[1].id));

        let latest = ledger.transfers.get_last_transactions(1).unwrap();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].id, log[0].id);
    }

    #[rstest]
    fn test_provisioning_runs_once(
        #[values(StoreKind::Memory, StoreKind::Sqlite)] kind: StoreKind,
    ) {
        let (ledger, store, _dir) = build_ledger(kind);

        let created = ledger
            .wallets
            .ensure_base_wallets(10, Decimal::new(100, 0))
            .unwrap();
        assert_eq!(created.len(), 10);

        let second = ledger.wallets.ensure_base_wallets(10, Decimal::new(100, 0));
        assert_eq!(second, Err(LedgerError::AlreadyProvisioned));

        let wallets = store.get_all().unwrap();
        assert_eq!(wallets.len(), 10);
        assert!(wallets.iter().all(|w| w.address.len() == 64));
        assert!(wallets.iter().all(|w| w.balance == Decimal::new(100, 0)));
    }

    #[test]
    fn test_sqlite_state_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.db");

        {
            let store = Arc::new(SqliteStore::open(&path).unwrap());
            let ledger = Ledger::new(store.clone(), store);
            ledger
                .wallets
                .create_wallet(Wallet::new("a", Decimal::new(100, 0)))
                .unwrap();
            ledger
                .wallets
                .create_wallet(Wallet::new("b", Decimal::new(50, 0)))
                .unwrap();
            ledger
                .transfers
                .transfer_funds("a", "b", Decimal::new(105, 1))
                .unwrap();
        }

        let store = Arc::new(SqliteStore::open(&path).unwrap());
        let ledger = Ledger::new(store.clone(), store);

        assert_eq!(
            ledger.wallets.get_balance("a").unwrap(),
            Decimal::new(895, 1)
        );
        assert_eq!(
            ledger.wallets.get_balance("b").unwrap(),
            Decimal::new(605, 1)
        );
        assert_eq!(
            ledger.wallets.ensure_base_wallets(3, Decimal::ONE),
            Err(LedgerError::AlreadyProvisioned)
        );
        let log = ledger.transfers.get_last_transactions(5).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].amount, Decimal::new(105, 1));
    }
}
