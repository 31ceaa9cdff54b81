//! SQLite-backed wallet and transaction stores
//!
//! One `SqliteStore` implements both store traits over a single connection.
//! Balances and amounts are stored as decimal TEXT so no precision is lost.
//!
//! # Schema
//!
//! ```text
//! wallets(address TEXT PRIMARY KEY, balance TEXT, version INTEGER)
//! transactions(id INTEGER PRIMARY KEY AUTOINCREMENT, from_address, to_address, amount)
//! ```
//!
//! The schema is created on open if it does not exist yet.

use std::path::Path;
use std::str::FromStr;

use parking_lot::Mutex;
use rusqlite::types::Type;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row, TransactionBehavior};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::core::traits::{TransactionStore, WalletStore};
use crate::types::{LedgerError, NewTransaction, Transaction, Wallet};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS wallets (
        address TEXT PRIMARY KEY,
        balance TEXT NOT NULL,
        version INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS transactions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        from_address TEXT NOT NULL,
        to_address TEXT NOT NULL,
        amount TEXT NOT NULL
    );
"#;

/// Durable store over a SQLite database
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Open or create a database file and make sure the schema exists
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let conn = Connection::open(path.as_ref())?;
        let store = Self::init(conn)?;
        info!(path = ?path.as_ref(), "opened ledger database");
        Ok(store)
    }

    /// Private in-memory database
    pub fn open_in_memory() -> Result<Self, LedgerError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, LedgerError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn wallet_from_row(row: &Row<'_>) -> rusqlite::Result<Wallet> {
    Ok(Wallet {
        address: row.get(0)?,
        balance: decimal_column(row, 1)?,
        version: row.get::<_, i64>(2)? as u64,
    })
}

fn transaction_from_row(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: row.get(0)?,
        from: row.get(1)?,
        to: row.get(2)?,
        amount: decimal_column(row, 3)?,
    })
}

impl WalletStore for SqliteStore {
    fn create(&self, wallet: &Wallet) -> Result<(), LedgerError> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO wallets (address, balance, version) VALUES (?1, ?2, ?3)",
            params![wallet.address, wallet.balance.to_string(), wallet.version as i64],
        )
        .map_err(|e| match e.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => LedgerError::duplicate_address(&wallet.address),
            _ => e.into(),
        })?;
        Ok(())
    }

    fn update(&self, wallet: &Wallet) -> Result<(), LedgerError> {
        let conn = self.conn.lock();
        let affected = conn.execute(
            "UPDATE wallets SET balance = ?1, version = version + 1 WHERE address = ?2",
            params![wallet.balance.to_string(), wallet.address],
        )?;
        if affected == 0 {
            return Err(LedgerError::wallet_not_found(&wallet.address));
        }
        Ok(())
    }

    fn get(&self, address: &str) -> Result<Wallet, LedgerError> {
        let conn = self.conn.lock();
        conn.query_row(
            "SELECT address, balance, version FROM wallets WHERE address = ?1",
            params![address],
            wallet_from_row,
        )
        .optional()?
        .ok_or_else(|| LedgerError::wallet_not_found(address))
    }

    fn get_all(&self) -> Result<Vec<Wallet>, LedgerError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT address, balance, version FROM wallets")?;
        let wallets = stmt
            .query_map([], wallet_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(wallets)
    }

    fn exists_any(&self) -> Result<bool, LedgerError> {
        let conn = self.conn.lock();
        let exists = conn.query_row("SELECT EXISTS (SELECT 1 FROM wallets)", [], |row| {
            row.get(0)
        })?;
        Ok(exists)
    }

    fn commit(&self, wallets: &[Wallet]) -> Result<(), LedgerError> {
        let mut ordered: Vec<&Wallet> = wallets.iter().collect();
        ordered.sort_by(|a, b| a.address.cmp(&b.address));

        let mut conn = self.conn.lock();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        for wallet in ordered {
            let affected = tx.execute(
                "UPDATE wallets SET balance = ?1, version = version + 1 \
                 WHERE address = ?2 AND version = ?3",
                params![
                    wallet.balance.to_string(),
                    wallet.address,
                    wallet.version as i64
                ],
            )?;
            if affected == 0 {
                let exists: bool = tx.query_row(
                    "SELECT EXISTS (SELECT 1 FROM wallets WHERE address = ?1)",
                    params![wallet.address],
                    |row| row.get(0),
                )?;
                debug!(address = %wallet.address, exists, "version-checked write rejected");
                // Dropping `tx` rolls back the writes made so far
                return Err(if exists {
                    LedgerError::version_conflict(&wallet.address)
                } else {
                    LedgerError::wallet_not_found(&wallet.address)
                });
            }
        }

        tx.commit()?;
        Ok(())
    }
}

impl TransactionStore for SqliteStore {
    fn create(&self, transaction: NewTransaction) -> Result<Transaction, LedgerError> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO transactions (from_address, to_address, amount) VALUES (?1, ?2, ?3)",
            params![
                transaction.from,
                transaction.to,
                transaction.amount.to_string()
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(transaction.into_transaction(id))
    }

    fn get_last(&self, count: usize) -> Result<Vec<Transaction>, LedgerError> {
        let limit = i64::try_from(count).unwrap_or(i64::MAX);
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, from_address, to_address, amount FROM transactions \
             ORDER BY id DESC LIMIT ?1",
        )?;
        let transactions = stmt
            .query_map(params![limit], transaction_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(transactions)
    }
}
