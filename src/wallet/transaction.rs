use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::Deserialize;

use super::error::WalletError;
use super::store::WalletId;
use super::Decimal;

/// Raw transaction request as parsed from the PATCH body.
/// This is the unvalidated form that needs conversion to a `Transaction`.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub wallet_id: WalletId,
    /// Expected to be `DEPOSIT` or `WITHDRAW`; checked during conversion
    pub operation_type: String,
    /// Must be a JSON number; quoted amounts are rejected
    #[serde(deserialize_with = "json_number")]
    pub amount: Decimal,
}

/// Accept only JSON numbers, parsed from their literal text so no binary
/// float rounding creeps in.
fn json_number<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|err| de::Error::custom(format!("invalid amount {text}: {err}")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    Deposit,
    Withdraw,
}

impl FromStr for OperationType {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEPOSIT" => Ok(OperationType::Deposit),
            "WITHDRAW" => Ok(OperationType::Withdraw),
            other => Err(WalletError::InvalidOperation(other.to_owned())),
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationType::Deposit => write!(f, "deposit"),
            OperationType::Withdraw => write!(f, "withdrawal"),
        }
    }
}

/// A validated operation ready for the `TransactionProcessor`.
#[derive(Debug, Clone, PartialEq)]
pub enum Transaction {
    Deposit { wallet_id: WalletId, amount: Decimal },
    Withdraw { wallet_id: WalletId, amount: Decimal },
}

impl Transaction {
    pub fn wallet_id(&self) -> &WalletId {
        match self {
            Transaction::Deposit { wallet_id, .. } | Transaction::Withdraw { wallet_id, .. } => {
                wallet_id
            }
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            Transaction::Deposit { amount, .. } | Transaction::Withdraw { amount, .. } => *amount,
        }
    }

    pub fn operation(&self) -> OperationType {
        match self {
            Transaction::Deposit { .. } => OperationType::Deposit,
            Transaction::Withdraw { .. } => OperationType::Withdraw,
        }
    }
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = WalletError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        let operation = record.operation_type.parse::<OperationType>()?;
        if record.amount <= Decimal::ZERO {
            return Err(WalletError::InvalidAmount {
                operation,
                amount: record.amount,
            });
        }
        let TransactionRecord {
            wallet_id, amount, ..
        } = record;
        Ok(match operation {
            OperationType::Deposit => Transaction::Deposit { wallet_id, amount },
            OperationType::Withdraw => Transaction::Withdraw { wallet_id, amount },
        })
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] wallet={} amount={}",
            self.operation(),
            self.wallet_id(),
            self.amount()
        )
    }
}
