//! Wallet Ledger CLI
//!
//! # Usage
//!
//! ```bash
//! cargo run -- serve
//! cargo run -- serve --bind 127.0.0.1:9000 --database /var/lib/ledger.db
//! cargo run -- serve --in-memory --base-wallets 3 --base-balance 250
//! cargo run -- export-wallets --database ledger.db > wallets.csv
//! ```
//!
//! `serve` provisions base wallets on an empty store and then serves the
//! HTTP API until Ctrl-C or SIGTERM. `export-wallets` writes the wallet table
//! to stdout as CSV.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (database unreadable, address in use, etc.)

use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use std::process;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use wallet_ledger::cli::{self, Command, ExportArgs, ServeArgs};
use wallet_ledger::{
    api, logging, write_wallets_csv, Ledger, LedgerError, MemoryTransactionStore,
    MemoryWalletStore, SqliteStore, WalletStore,
};

fn main() {
    let args = cli::parse_args();
    logging::init_logging(&args.log_level, args.log_format);

    let result = match args.command {
        Command::Serve(serve_args) => serve(serve_args),
        Command::ExportWallets(export_args) => export_wallets(export_args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn serve(args: ServeArgs) -> Result<()> {
    let ledger = open_ledger(&args)?;

    match ledger
        .wallets
        .ensure_base_wallets(args.base_wallets, args.base_balance)
    {
        Ok(_) => {}
        Err(LedgerError::AlreadyProvisioned) => {
            info!("wallets already provisioned, skipping base wallet creation")
        }
        Err(e) => return Err(e).context("failed to provision base wallets"),
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(args.workers())
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(run_server(args.bind, ledger))
}

fn open_ledger(args: &ServeArgs) -> Result<Ledger> {
    let ledger = if args.in_memory {
        info!("using in-memory stores, state is lost on exit");
        Ledger::new(
            Arc::new(MemoryWalletStore::new()),
            Arc::new(MemoryTransactionStore::new()),
        )
    } else {
        let store = Arc::new(SqliteStore::open(&args.database).with_context(|| {
            format!("failed to open database at {}", args.database.display())
        })?);
        Ledger::new(store.clone(), store)
    };
    Ok(ledger.with_max_attempts(args.max_attempts))
}

async fn run_server(bind: SocketAddr, ledger: Ledger) -> Result<()> {
    let router = api::create_router(ledger);
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind listener on {}", bind))?;
    info!(%bind, "ledger API listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server error")?;

    info!("wallet-ledger stopped");
    Ok(())
}

fn export_wallets(args: ExportArgs) -> Result<()> {
    if !args.database.exists() {
        bail!("database not found: {}", args.database.display());
    }
    let store = SqliteStore::open(&args.database)
        .with_context(|| format!("failed to open database at {}", args.database.display()))?;
    let wallets = store.get_all().context("failed to read wallets")?;

    let stdout = std::io::stdout();
    let mut output = stdout.lock();
    write_wallets_csv(&wallets, &mut output).map_err(anyhow::Error::msg)
}

/// Resolves on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("shutdown signal received, draining connections");
}
