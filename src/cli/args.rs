use crate::core::DEFAULT_MAX_ATTEMPTS;
use crate::logging::LogFormat;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Wallet ledger service
#[derive(Parser, Debug)]
#[command(name = "wallet-ledger")]
#[command(about = "Wallet ledger with an HTTP transfer API", long_about = None, version)]
pub struct CliArgs {
    /// Default log filter, overridden by RUST_LOG
    #[arg(long, global = true, env = "LEDGER_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, global = true, env = "LEDGER_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Provision base wallets and serve the HTTP API
    Serve(ServeArgs),
    /// Write every wallet to stdout as CSV
    ExportWallets(ExportArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "LEDGER_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// SQLite database file
    #[arg(long, env = "LEDGER_DATABASE", default_value = "ledger.db")]
    pub database: PathBuf,

    /// Keep all state in memory instead of SQLite
    #[arg(long)]
    pub in_memory: bool,

    /// Number of wallets created on first start
    #[arg(long, env = "LEDGER_BASE_WALLETS", default_value_t = 10)]
    pub base_wallets: usize,

    /// Initial balance of each base wallet
    #[arg(long, env = "LEDGER_BASE_BALANCE", default_value = "100")]
    pub base_balance: Decimal,

    /// Attempts per transfer before giving up under contention
    #[arg(long, env = "LEDGER_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,

    /// Runtime worker threads (default: CPU cores)
    #[arg(long, env = "LEDGER_WORKERS", value_name = "COUNT")]
    pub workers: Option<usize>,
}

impl ServeArgs {
    /// Worker thread count for the runtime
    ///
    /// Zero is not a usable value and falls back to the number of CPU cores.
    pub fn workers(&self) -> usize {
        match self.workers {
            Some(0) => {
                tracing::warn!(
                    fallback = num_cpus::get(),
                    "--workers must be positive, using the CPU core count"
                );
                num_cpus::get()
            }
            Some(n) => n,
            None => num_cpus::get(),
        }
    }
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// SQLite database file to read
    #[arg(long, env = "LEDGER_DATABASE", default_value = "ledger.db")]
    pub database: PathBuf,
}
