use std::io::{Read, Write};
use std::path::Path;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use super::error::StoreError;
use super::store::{BalanceStore, WalletId};
use super::Decimal;

/// One row of a wallet seed or snapshot file.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct WalletRecord {
    wallet_id: WalletId,
    balance: Decimal,
}

/// Errors while provisioning wallets from a seed file.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("wallet {wallet_id} has negative balance {balance}")]
    NegativeBalance { wallet_id: WalletId, balance: Decimal },

    #[error("wallet {wallet_id} is provisioned more than once")]
    DuplicateWallet { wallet_id: WalletId },

    #[error("wallet ID must not be empty")]
    EmptyWalletId,
}

/// Concurrent in-process balance store.
///
/// Balances live in a sharded map; `apply_delta` holds the write guard of a
/// single wallet's entry for the whole read-check-write, so same-wallet
/// updates serialize while different wallets proceed independently.
#[derive(Debug, Default)]
pub struct InMemoryBalanceStore {
    balances: DashMap<WalletId, Decimal>,
}

impl InMemoryBalanceStore {
    pub fn new() -> Self {
        log::trace!("InMemoryBalanceStore initialized");
        Self {
            balances: DashMap::new(),
        }
    }

    /// Register a wallet with its opening balance.
    pub fn provision(&self, wallet_id: WalletId, balance: Decimal) -> Result<(), SeedError> {
        if wallet_id.is_empty() {
            return Err(SeedError::EmptyWalletId);
        }
        if balance < Decimal::ZERO {
            return Err(SeedError::NegativeBalance { wallet_id, balance });
        }
        match self.balances.entry(wallet_id) {
            Entry::Occupied(entry) => Err(SeedError::DuplicateWallet {
                wallet_id: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                log::debug!("[provision] wallet={} balance={balance}", entry.key());
                entry.insert(balance.normalize());
                Ok(())
            }
        }
    }

    /// Load wallets from CSV with columns `wallet_id,balance`.
    /// Returns the number of wallets provisioned.
    pub fn load_wallets<R: Read>(&self, reader: R) -> Result<usize, SeedError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut loaded = 0usize;
        for result in csv_reader.deserialize() {
            let record: WalletRecord = result?;
            self.provision(record.wallet_id, record.balance)?;
            loaded += 1;
        }

        log::info!("Loaded {loaded} wallets");
        Ok(loaded)
    }

    /// Write every wallet as CSV, ordered by wallet ID.
    pub fn export_wallets<W: Write>(&self, writer: W) -> Result<(), SeedError> {
        let mut records: Vec<WalletRecord> = self
            .balances
            .iter()
            .map(|entry| WalletRecord {
                wallet_id: entry.key().clone(),
                balance: *entry.value(),
            })
            .collect();
        records.sort_by(|a, b| a.wallet_id.cmp(&b.wallet_id));

        log::info!("Exporting {} wallets", records.len());

        let mut csv_writer = csv::Writer::from_writer(writer);
        for record in &records {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Export every wallet to `path`, replacing it atomically.
    ///
    /// The CSV is written to a temporary file in the same directory and then
    /// renamed over `path`, so a failed write leaves the previous file intact.
    pub fn write_snapshot(&self, path: &Path) -> Result<(), SeedError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        self.export_wallets(&mut file)?;
        file.as_file().sync_all()?;
        file.persist(path).map_err(|err| SeedError::Io(err.error))?;
        Ok(())
    }

    /// Returns the number of wallets in the store
    pub fn wallet_count(&self) -> usize {
        self.balances.len()
    }
}

impl BalanceStore for InMemoryBalanceStore {
    fn read_balance(&self, wallet_id: &WalletId) -> Result<Decimal, StoreError> {
        self.balances
            .get(wallet_id)
            .map(|balance| *balance)
            .ok_or_else(|| StoreError::NotFound {
                wallet_id: wallet_id.clone(),
            })
    }

    fn apply_delta(&self, wallet_id: &WalletId, delta: Decimal) -> Result<Decimal, StoreError> {
        // The guard keeps this wallet's shard write-locked until we return.
        let mut balance = self
            .balances
            .get_mut(wallet_id)
            .ok_or_else(|| StoreError::NotFound {
                wallet_id: wallet_id.clone(),
            })?;

        let updated = balance.checked_add(delta).ok_or_else(|| {
            StoreError::Unavailable(format!("balance overflow for wallet {wallet_id}"))
        })?;

        // Decimal rounds past 28 significant digits; refuse rather than drop part of the delta.
        if updated.checked_sub(*balance) != Some(delta) {
            return Err(StoreError::Unavailable(format!(
                "delta {delta} exceeds the precision of wallet {wallet_id}"
            )));
        }

        if updated < Decimal::ZERO {
            return Err(StoreError::InsufficientFunds {
                wallet_id: wallet_id.clone(),
                balance: *balance,
                requested: -delta,
            });
        }

        *balance = updated.normalize();
        log::trace!("[apply_delta] wallet={wallet_id} delta={delta} -> balance={}", *balance);
        Ok(*balance)
    }
}
