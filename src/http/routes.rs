use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};

use super::handlers::{apply_transaction, get_balance, missing_wallet_id, AppState};
use crate::wallet::{BalanceStore, TransactionProcessor};

/// Build the wallet API router around a shared processor.
pub fn router<S>(processor: Arc<TransactionProcessor<S>>) -> Router
where
    S: BalanceStore + 'static,
{
    Router::new()
        .route("/api/v1/wallets/:wallet_id", get(get_balance::<S>))
        .route(
            "/api/v1/wallets/",
            get(missing_wallet_id).patch(apply_transaction::<S>),
        )
        .layer(middleware::from_fn(log_requests))
        .layer(CatchPanicLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(AppState::new(processor))
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    log::info!(
        "{method} {path} -> {} ({:?})",
        response.status().as_u16(),
        started.elapsed()
    );
    response
}
