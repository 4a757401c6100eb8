//! Integration tests for the `TransactionProcessor`.
//!
//! These tests exercise the processor against the in-memory store, including
//! concurrent deposits and withdrawals on the same wallet.
use std::thread;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use wallet_ledger::{
    ErrorKind, InMemoryBalanceStore, Transaction, TransactionProcessor, TransactionRecord,
    WalletId,
};

/// Helper to build a processor with the given wallets provisioned
fn processor(wallets: &[(&str, Decimal)]) -> TransactionProcessor<InMemoryBalanceStore> {
    let store = InMemoryBalanceStore::new();
    for (id, balance) in wallets {
        store.provision(WalletId::from(*id), *balance).unwrap();
    }
    TransactionProcessor::new(store)
}

#[test]
fn test_wallet_scenario() {
    let processor = processor(&[("wallet-123", dec!(100))]);
    let id = WalletId::from("wallet-123");

    processor.deposit(&id, dec!(100)).unwrap();
    assert_eq!(processor.get_balance(&id).unwrap(), dec!(200));

    processor.withdraw(&id, dec!(50)).unwrap();
    assert_eq!(processor.get_balance(&id).unwrap(), dec!(150));

    let err = processor.withdraw(&id, dec!(200)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientFunds);
    assert_eq!(processor.get_balance(&id).unwrap(), dec!(150));
}

#[test]
fn test_unknown_wallet_balance_is_not_found() {
    let processor = processor(&[]);
    let err = processor
        .get_balance(&WalletId::from("unknown-wallet"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_deposit_then_withdraw_round_trips_exactly() {
    let processor = processor(&[("w", dec!(0.3))]);
    let id = WalletId::from("w");

    for amount in [dec!(0.1), dec!(0.2), dec!(1234.5678), dec!(0.0001)] {
        processor.deposit(&id, amount).unwrap();
        processor.withdraw(&id, amount).unwrap();
        assert_eq!(processor.get_balance(&id).unwrap(), dec!(0.3));
    }
}

#[test]
fn test_invalid_amounts_leave_balance_unchanged() {
    let processor = processor(&[("w", dec!(10))]);
    let id = WalletId::from("w");

    for amount in [Decimal::ZERO, dec!(-0.0001), dec!(-10)] {
        assert_eq!(
            processor.deposit(&id, amount).unwrap_err().kind(),
            ErrorKind::InvalidAmount
        );
        assert_eq!(
            processor.withdraw(&id, amount).unwrap_err().kind(),
            ErrorKind::InvalidAmount
        );
    }
    assert_eq!(processor.get_balance(&id).unwrap(), dec!(10));
}

#[test]
fn test_operations_on_different_wallets_are_independent() {
    let processor = processor(&[("a", dec!(10)), ("b", dec!(20))]);
    let a = WalletId::from("a");
    let b = WalletId::from("b");

    processor.withdraw(&a, dec!(10)).unwrap();
    assert!(processor.withdraw(&a, dec!(1)).is_err());
    processor.deposit(&b, dec!(5)).unwrap();

    assert_eq!(processor.get_balance(&a).unwrap(), Decimal::ZERO);
    assert_eq!(processor.get_balance(&b).unwrap(), dec!(25));
}

#[test]
fn test_record_conversion_feeds_execute() {
    let processor = processor(&[("w", dec!(5))]);
    let record: TransactionRecord = serde_json::from_str(
        r#"{"walletId":"w","operationType":"WITHDRAW","amount":2.5}"#,
    )
    .unwrap();

    let balance = processor
        .execute(Transaction::try_from(record).unwrap())
        .unwrap();
    assert_eq!(balance, dec!(2.5));
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_concurrent_deposits_lose_no_updates() {
    const WORKERS: usize = 16;
    const PER_WORKER: usize = 250;

    let processor = processor(&[("shared", dec!(100))]);
    let id = WalletId::from("shared");

    thread::scope(|scope| {
        for _ in 0..WORKERS {
            scope.spawn(|| {
                for _ in 0..PER_WORKER {
                    processor.deposit(&id, dec!(0.01)).unwrap();
                }
            });
        }
    });

    let expected = dec!(100) + dec!(0.01) * Decimal::from(WORKERS * PER_WORKER);
    assert_eq!(processor.get_balance(&id).unwrap(), expected);
}

#[test]
fn test_concurrent_withdrawals_never_overdraw() {
    const WORKERS: usize = 32;

    // Enough for exactly 10 withdrawals of 10.
    let processor = processor(&[("shared", dec!(100))]);
    let id = WalletId::from("shared");

    let outcomes: Vec<bool> = thread::scope(|scope| {
        let handles: Vec<_> = (0..WORKERS)
            .map(|_| scope.spawn(|| processor.withdraw(&id, dec!(10)).is_ok()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let succeeded = outcomes.iter().filter(|ok| **ok).count();
    assert_eq!(succeeded, 10);
    assert_eq!(processor.get_balance(&id).unwrap(), Decimal::ZERO);
}

#[test]
fn test_concurrent_mixed_operations_match_serial_result() {
    let processor = processor(&[("shared", dec!(50))]);
    let id = WalletId::from("shared");

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..100 {
                    processor.deposit(&id, dec!(3)).unwrap();
                    processor.withdraw(&id, dec!(2)).unwrap();
                }
            });
        }
    });

    // Each worker nets +1 per iteration and never dips below the opening balance.
    assert_eq!(processor.get_balance(&id).unwrap(), dec!(850));
}

// ============================================================================
// Seed / snapshot files
// ============================================================================

#[test]
fn test_snapshot_restores_balances_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    let seed = dir.path().join("wallets.csv");
    let snapshot = dir.path().join("snapshot.csv");
    std::fs::write(&seed, "wallet_id,balance\nwallet-123,100\nwallet-456,7.5\n").unwrap();

    let store = InMemoryBalanceStore::new();
    let loaded = store
        .load_wallets(std::fs::File::open(&seed).unwrap())
        .unwrap();
    assert_eq!(loaded, 2);

    let processor = TransactionProcessor::new(store);
    processor
        .withdraw(&WalletId::from("wallet-123"), dec!(40))
        .unwrap();
    processor
        .store()
        .export_wallets(std::fs::File::create(&snapshot).unwrap())
        .unwrap();

    let restarted = InMemoryBalanceStore::new();
    restarted
        .load_wallets(std::fs::File::open(&snapshot).unwrap())
        .unwrap();
    let processor = TransactionProcessor::new(restarted);
    assert_eq!(
        processor.get_balance(&WalletId::from("wallet-123")).unwrap(),
        dec!(60)
    );
    assert_eq!(
        processor.get_balance(&WalletId::from("wallet-456")).unwrap(),
        dec!(7.5)
    );
}

#[test]
fn test_seed_with_duplicate_wallet_is_rejected() {
    let store = InMemoryBalanceStore::new();
    let err = store
        .load_wallets("wallet_id,balance\na,1\na,2\n".as_bytes())
        .unwrap_err();
    assert!(matches!(err, wallet_ledger::SeedError::DuplicateWallet { .. }));
}
