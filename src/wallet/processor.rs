use std::sync::Arc;

use super::error::WalletError;
use super::event::{EventSink, LogEventSink, WalletEvent};
use super::store::{BalanceStore, WalletId};
use super::transaction::{OperationType, Transaction};
use super::Decimal;

/// Validates deposit/withdraw intents and applies them to a `BalanceStore`.
///
/// Every mutation goes through a single `apply_delta` call, so the
/// sufficiency check for a withdrawal is made against the same balance the
/// debit is applied to. The processor never retries: a failure is returned
/// to the caller as-is, wrapped with the operation and wallet.
pub struct TransactionProcessor<S> {
    store: S,
    events: Arc<dyn EventSink>,
}

impl<S: BalanceStore> TransactionProcessor<S> {
    /// Create a processor that reports events through the `log` facade
    pub fn new(store: S) -> Self {
        Self::with_event_sink(store, Arc::new(LogEventSink))
    }

    pub fn with_event_sink(store: S, events: Arc<dyn EventSink>) -> Self {
        log::trace!("TransactionProcessor initialized");
        Self { store, events }
    }

    /// Returns the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get_balance(&self, wallet_id: &WalletId) -> Result<Decimal, WalletError> {
        match self.store.read_balance(wallet_id) {
            Ok(balance) => {
                self.events.emit(WalletEvent::BalanceRead {
                    wallet_id: wallet_id.clone(),
                    balance,
                });
                Ok(balance)
            }
            Err(source) => Err(self.fail(WalletError::Retrieve {
                wallet_id: wallet_id.clone(),
                source,
            })),
        }
    }

    /// Credit `amount` to the wallet and return the new balance.
    pub fn deposit(&self, wallet_id: &WalletId, amount: Decimal) -> Result<Decimal, WalletError> {
        self.ensure_positive(wallet_id, OperationType::Deposit, amount)?;

        let balance = self
            .store
            .apply_delta(wallet_id, amount)
            .map_err(|source| {
                self.fail(WalletError::Deposit {
                    wallet_id: wallet_id.clone(),
                    source,
                })
            })?;

        self.events.emit(WalletEvent::Deposited {
            wallet_id: wallet_id.clone(),
            amount,
            balance,
        });
        Ok(balance)
    }

    /// Debit `amount` from the wallet and return the new balance.
    ///
    /// Sufficiency is decided by the store inside the same atomic update that
    /// applies the debit; an insufficient balance leaves the wallet untouched.
    pub fn withdraw(&self, wallet_id: &WalletId, amount: Decimal) -> Result<Decimal, WalletError> {
        self.ensure_positive(wallet_id, OperationType::Withdraw, amount)?;

        let balance = self
            .store
            .apply_delta(wallet_id, -amount)
            .map_err(|source| {
                self.fail(WalletError::Withdraw {
                    wallet_id: wallet_id.clone(),
                    source,
                })
            })?;

        self.events.emit(WalletEvent::Withdrew {
            wallet_id: wallet_id.clone(),
            amount,
            balance,
        });
        Ok(balance)
    }

    /// Run an already validated transaction.
    pub fn execute(&self, transaction: Transaction) -> Result<Decimal, WalletError> {
        log::trace!("Executing transaction: {transaction}");
        match transaction {
            Transaction::Deposit { wallet_id, amount } => self.deposit(&wallet_id, amount),
            Transaction::Withdraw { wallet_id, amount } => self.withdraw(&wallet_id, amount),
        }
    }

    fn ensure_positive(
        &self,
        wallet_id: &WalletId,
        operation: OperationType,
        amount: Decimal,
    ) -> Result<(), WalletError> {
        if amount > Decimal::ZERO {
            return Ok(());
        }
        let err = WalletError::InvalidAmount { operation, amount };
        self.events.emit(WalletEvent::Failed {
            wallet_id: wallet_id.clone(),
            kind: err.kind(),
            message: err.to_string(),
        });
        Err(err)
    }

    fn fail(&self, err: WalletError) -> WalletError {
        if let Some(wallet_id) = err.wallet_id() {
            self.events.emit(WalletEvent::Failed {
                wallet_id: wallet_id.clone(),
                kind: err.kind(),
                message: err.to_string(),
            });
        }
        err
    }
}

impl<S> std::fmt::Debug for TransactionProcessor<S>
where
    S: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionProcessor")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
