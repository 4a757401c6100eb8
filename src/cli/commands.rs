pub(crate) use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "wallet-ledger",
    author,
    version,
    about = "A minimal wallet ledger served over HTTP",
    long_about = None,
    after_help = "SEED FILE:\n    CSV with columns: wallet_id, balance\n\n    wallet-ledger --wallets wallets.csv --snapshot wallets.csv"
)]
pub struct Args {
    /// Address the HTTP server binds to
    #[arg(long, env = "WALLET_LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// CSV file the wallets are provisioned from at startup
    #[arg(long, env = "WALLET_SEED_FILE", value_name = "FILE")]
    pub wallets: Option<PathBuf>,

    /// CSV file all balances are written to on shutdown
    #[arg(long, env = "WALLET_SNAPSHOT_FILE", value_name = "FILE")]
    pub snapshot: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
