mod commands;

use std::sync::Arc;

use anyhow::{Context, Result};
use commands::{Args, Parser};
use wallet_ledger::{http, InMemoryBalanceStore, TransactionProcessor};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse the CLI arguments
    let args = Args::parse();

    // Initialize logger (RUST_LOG wins over --log-level)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    // 1. Provision the balance store
    let store = InMemoryBalanceStore::new();
    if let Some(path) = &args.wallets {
        log::info!("Loading wallets from {}", path.display());
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open wallet seed file: {}", path.display()))?;
        store
            .load_wallets(file)
            .with_context(|| format!("Failed to load wallets from {}", path.display()))?;
    } else {
        log::warn!("No wallet seed file given, every request will report wallet not found");
    }

    // 2. Wire the processor into the HTTP router
    let processor = Arc::new(TransactionProcessor::new(store));
    let app = http::router(Arc::clone(&processor));

    // 3. Serve until SIGINT/SIGTERM
    let listener = tokio::net::TcpListener::bind(args.listen)
        .await
        .with_context(|| format!("Failed to bind {}", args.listen))?;
    let served = http::serve(listener, app, shutdown_signal()).await;
    if let Err(err) = &served {
        log::error!("HTTP server failed: {err}");
    }

    // 4. Persist balances, whether or not the server stopped cleanly
    if let Some(path) = &args.snapshot {
        processor
            .store()
            .write_snapshot(path)
            .with_context(|| format!("Failed to write wallet snapshot: {}", path.display()))?;
        log::info!("Snapshot written to {}", path.display());
    }

    served.context("HTTP server failed")
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => log::info!("Received SIGTERM"),
                    _ = wait_for_ctrl_c() => log::info!("Received SIGINT"),
                }
            }
            Err(err) => {
                log::error!("Failed to install SIGTERM handler: {err}");
                wait_for_ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    wait_for_ctrl_c().await;

    log::info!("Shutdown signal received, stopping server");
}

async fn wait_for_ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {err}");
        std::future::pending::<()>().await;
    }
}
