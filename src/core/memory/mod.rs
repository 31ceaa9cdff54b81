//! In-process implementations of the store traits
//!
//! Used for tests, benchmarks and `serve --in-memory`. State lives only as long
//! as the process.

pub mod transaction_store;
pub mod wallet_store;

pub use transaction_store::MemoryTransactionStore;
pub use wallet_store::MemoryWalletStore;
