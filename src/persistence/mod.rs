//! Durable storage
//!
//! - `sqlite` - Wallet and transaction stores over a SQLite database

pub mod sqlite;

pub use sqlite::SqliteStore;
