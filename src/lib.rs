//! Minimal wallet ledger.
//!
//! The [`wallet`] module holds the balance-mutation core: a [`BalanceStore`]
//! that applies signed deltas atomically per wallet, and a
//! [`TransactionProcessor`] that validates deposit/withdraw intents against it.
//! The [`http`] module exposes the core over a small JSON API.

pub mod http;
pub mod wallet;

pub use wallet::{
    BalanceStore, ErrorKind, EventSink, InMemoryBalanceStore, LogEventSink, OperationType,
    SeedError, StoreError, Transaction, TransactionProcessor, TransactionRecord, WalletError,
    WalletEvent, WalletId,
};
