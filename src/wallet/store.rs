use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::StoreError;
use super::Decimal;

/// Opaque, externally assigned wallet identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletId(String);

impl WalletId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for WalletId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for WalletId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Holder of each wallet's current balance.
///
/// Implementations are shared by every request worker, so both operations
/// take `&self` and must be safe to call concurrently.
pub trait BalanceStore: Send + Sync {
    /// Current balance of `wallet_id`, or `StoreError::NotFound`.
    fn read_balance(&self, wallet_id: &WalletId) -> Result<Decimal, StoreError>;

    /// Add `delta` to the balance of `wallet_id` and return the new balance.
    ///
    /// Read, non-negativity check and write happen as one unit with respect to
    /// every other call on the same wallet: concurrent deltas must never be
    /// lost, and a delta that would leave the balance below zero fails with
    /// `StoreError::InsufficientFunds` without changing the record. Unknown
    /// wallets fail with `StoreError::NotFound` and are never created.
    fn apply_delta(&self, wallet_id: &WalletId, delta: Decimal) -> Result<Decimal, StoreError>;
}

impl<S: BalanceStore + ?Sized> BalanceStore for std::sync::Arc<S> {
    fn read_balance(&self, wallet_id: &WalletId) -> Result<Decimal, StoreError> {
        (**self).read_balance(wallet_id)
    }

    fn apply_delta(&self, wallet_id: &WalletId, delta: Decimal) -> Result<Decimal, StoreError> {
        (**self).apply_delta(wallet_id, delta)
    }
}
