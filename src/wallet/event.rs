use std::fmt;

use super::error::ErrorKind;
use super::store::WalletId;
use super::Decimal;

/// Something the processor did (or refused to do) to a wallet.
#[derive(Debug, Clone, PartialEq)]
pub enum WalletEvent {
    BalanceRead {
        wallet_id: WalletId,
        balance: Decimal,
    },
    Deposited {
        wallet_id: WalletId,
        amount: Decimal,
        balance: Decimal,
    },
    Withdrew {
        wallet_id: WalletId,
        amount: Decimal,
        balance: Decimal,
    },
    Failed {
        wallet_id: WalletId,
        kind: ErrorKind,
        message: String,
    },
}

impl fmt::Display for WalletEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletEvent::BalanceRead { wallet_id, balance } => {
                write!(f, "[balance] wallet={wallet_id} balance={balance}")
            }
            WalletEvent::Deposited {
                wallet_id,
                amount,
                balance,
            } => write!(
                f,
                "[deposit] wallet={wallet_id} amount={amount} -> new_balance={balance}"
            ),
            WalletEvent::Withdrew {
                wallet_id,
                amount,
                balance,
            } => write!(
                f,
                "[withdraw] wallet={wallet_id} amount={amount} -> new_balance={balance}"
            ),
            WalletEvent::Failed {
                wallet_id,
                kind,
                message,
            } => write!(f, "[failed] wallet={wallet_id} kind={kind:?}: {message}"),
        }
    }
}

/// Receiver for processor events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: WalletEvent);
}

/// Default sink: writes each event through the `log` facade.
/// Refused operations log at `warn`, store failures at `error`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn emit(&self, event: WalletEvent) {
        match &event {
            WalletEvent::Failed {
                kind: ErrorKind::StoreFailure,
                ..
            } => log::error!("{event}"),
            WalletEvent::Failed { .. } => log::warn!("{event}"),
            _ => log::info!("{event}"),
        }
    }
}
