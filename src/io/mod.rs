//! I/O module
//!
//! Handles CSV output.
//!
//! # Components
//!
//! - `csv_format` - Wallet export serialization

pub mod csv_format;

pub use csv_format::write_wallets_csv;
