use crate::wallet::store::WalletId;
use crate::wallet::transaction::OperationType;
use crate::wallet::Decimal;

/// Failures reported by a `BalanceStore`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("wallet not found")]
    NotFound { wallet_id: WalletId },

    /// The delta would have taken the balance below zero; nothing was written.
    #[error("insufficient funds")]
    InsufficientFunds {
        wallet_id: WalletId,
        balance: Decimal,
        requested: Decimal,
    },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the `TransactionProcessor`.
///
/// Wrapping variants keep the wallet they were acting on and the store error
/// as their source; the rendered message is what callers show to clients.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("{operation} amount must be positive")]
    InvalidAmount {
        operation: OperationType,
        amount: Decimal,
    },

    #[error("invalid operation type: {0}")]
    InvalidOperation(String),

    #[error("could not retrieve balance: {source}")]
    Retrieve {
        wallet_id: WalletId,
        #[source]
        source: StoreError,
    },

    #[error("could not deposit amount: {source}")]
    Deposit {
        wallet_id: WalletId,
        #[source]
        source: StoreError,
    },

    #[error("could not withdraw amount: {source}")]
    Withdraw {
        wallet_id: WalletId,
        #[source]
        source: StoreError,
    },
}

/// Flat classification of a `WalletError`, for callers that branch on the
/// failure category rather than on the operation that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidAmount,
    InvalidOperation,
    NotFound,
    InsufficientFunds,
    StoreFailure,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            StoreError::Unavailable(_) => ErrorKind::StoreFailure,
        }
    }
}

impl WalletError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WalletError::InvalidAmount { .. } => ErrorKind::InvalidAmount,
            WalletError::InvalidOperation(_) => ErrorKind::InvalidOperation,
            WalletError::Retrieve { source, .. }
            | WalletError::Deposit { source, .. }
            | WalletError::Withdraw { source, .. } => source.kind(),
        }
    }

    /// The wallet the failed operation targeted, if it got that far.
    pub fn wallet_id(&self) -> Option<&WalletId> {
        match self {
            WalletError::Retrieve { wallet_id, .. }
            | WalletError::Deposit { wallet_id, .. }
            | WalletError::Withdraw { wallet_id, .. } => Some(wallet_id),
            WalletError::InvalidAmount { .. } | WalletError::InvalidOperation(_) => None,
        }
    }
}
