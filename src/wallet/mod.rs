//! Wallet ledger core.
//!
//! This module contains the balance-mutation protocol including:
//! - `BalanceStore` - Durable wallet ID → balance mapping with atomic deltas
//! - `InMemoryBalanceStore` - The concurrent in-process store adapter
//! - `TransactionProcessor` - Validates and applies deposits and withdrawals
//! - `Transaction` types - Raw request records and validated operations
//! - `Error` types - Store and processing failures

mod error;
mod event;
mod memory_store;
mod processor;
mod store;
mod transaction;

pub(crate) use rust_decimal::Decimal;

pub use error::{ErrorKind, StoreError, WalletError};
pub use event::{EventSink, LogEventSink, WalletEvent};
pub use memory_store::{InMemoryBalanceStore, SeedError};
pub use processor::TransactionProcessor;
pub use store::{BalanceStore, WalletId};
pub use transaction::{OperationType, Transaction, TransactionRecord};
