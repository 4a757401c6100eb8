use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::wallet::{
    BalanceStore, Decimal, ErrorKind, Transaction, TransactionProcessor, TransactionRecord,
    WalletId,
};

/// Shared handler state.
pub(crate) struct AppState<S> {
    processor: Arc<TransactionProcessor<S>>,
}

impl<S> AppState<S> {
    pub(crate) fn new(processor: Arc<TransactionProcessor<S>>) -> Self {
        Self { processor }
    }
}

// Manual impl: cloning the state only clones the `Arc`, whatever `S` is.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            processor: Arc::clone(&self.processor),
        }
    }
}

/// An error rendered as `{"error": "<message>"}`.
#[derive(Debug)]
pub(crate) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct BalanceResponse {
    #[serde(with = "rust_decimal::serde::float")]
    balance: Decimal,
}

#[derive(Debug, Serialize)]
pub(crate) struct MessageResponse {
    message: &'static str,
}

pub(crate) async fn get_balance<S: BalanceStore>(
    State(state): State<AppState<S>>,
    Path(wallet_id): Path<String>,
) -> Result<Json<BalanceResponse>, ApiError> {
    if wallet_id.is_empty() {
        return Err(ApiError::bad_request("walletID is required"));
    }

    let wallet_id = WalletId::from(wallet_id);
    match state.processor.get_balance(&wallet_id) {
        Ok(balance) => Ok(Json(BalanceResponse { balance })),
        Err(err) => {
            log::error!("Failed to get balance for wallet {wallet_id}: {err}");
            Err(ApiError::internal("could not retrieve balance"))
        }
    }
}

pub(crate) async fn missing_wallet_id() -> ApiError {
    ApiError::bad_request("walletID is required")
}

pub(crate) async fn apply_transaction<S: BalanceStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<TransactionRecord>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(record) = payload.map_err(|rejection| {
        log::debug!("Rejected transaction payload: {rejection}");
        ApiError::bad_request("invalid request payload")
    })?;

    if record.amount <= Decimal::ZERO {
        return Err(ApiError::bad_request("amount must be positive"));
    }

    let transaction = Transaction::try_from(record).map_err(|err| match err.kind() {
        ErrorKind::InvalidOperation => ApiError::bad_request("invalid operation type"),
        _ => ApiError::bad_request(err.to_string()),
    })?;

    let wallet_id = transaction.wallet_id().clone();
    state.processor.execute(transaction).map_err(|err| {
        log::error!("Failed to process transaction for wallet {wallet_id}: {err}");
        ApiError::internal(err.to_string())
    })?;

    Ok(Json(MessageResponse {
        message: "transaction successful",
    }))
}
