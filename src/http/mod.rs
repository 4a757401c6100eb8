//! JSON delivery layer over the wallet core.
//!
//! - `GET   /api/v1/wallets/:walletID` - current balance
//! - `PATCH /api/v1/wallets/` - deposit or withdraw

mod handlers;
mod routes;

use std::future::Future;

use tokio::net::TcpListener;

pub use routes::router;

/// Serve `app` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: axum::Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        log::info!("Wallet API listening on http://{addr}");
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
