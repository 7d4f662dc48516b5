//! Property-based tests for balance maintenance.

use std::collections::HashMap;

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::balance::{creation_delta, deletion_delta, normalize_amount, update_deltas};
use super::types::TransactionType;

/// One simulated mutation against the ledger.
#[derive(Debug, Clone)]
enum Op {
    Create {
        account: usize,
        transaction_type: TransactionType,
        amount: Decimal,
    },
    Update {
        slot: usize,
        account: usize,
        transaction_type: TransactionType,
        amount: Decimal,
    },
    Delete {
        slot: usize,
    },
}

fn transaction_type_strategy() -> impl Strategy<Value = TransactionType> {
    prop_oneof![
        Just(TransactionType::Income),
        Just(TransactionType::Expense)
    ]
}

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    // Cent-denominated amounts, both signs, to exercise normalization.
    (-1_000_000i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..4, transaction_type_strategy(), amount_strategy()).prop_map(
            |(account, transaction_type, amount)| Op::Create {
                account,
                transaction_type,
                amount,
            }
        ),
        (
            0usize..16,
            0usize..4,
            transaction_type_strategy(),
            amount_strategy()
        )
            .prop_map(|(slot, account, transaction_type, amount)| Op::Update {
                slot,
                account,
                transaction_type,
                amount,
            }),
        (0usize..16).prop_map(|slot| Op::Delete { slot }),
    ]
}

proptest! {
    /// After every create/update/delete, each account's balance equals the
    /// signed sum of the live transactions referencing it.
    #[test]
    fn balance_equals_sum_of_live_transactions(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let account_ids: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let mut balances: HashMap<Uuid, Decimal> =
            account_ids.iter().map(|id| (*id, Decimal::ZERO)).collect();
        // Live transactions: (account, stored amount).
        let mut live: Vec<(Uuid, Decimal)> = Vec::new();

        for op in ops {
            match op {
                Op::Create { account, transaction_type, amount } => {
                    let account_id = account_ids[account];
                    let stored = normalize_amount(transaction_type, amount);
                    let delta = creation_delta(account_id, stored);
                    *balances.get_mut(&delta.account_id).unwrap() += delta.amount;
                    live.push((account_id, stored));
                }
                Op::Update { slot, account, transaction_type, amount } => {
                    if live.is_empty() {
                        continue;
                    }
                    let slot = slot % live.len();
                    let (old_account, old_amount) = live[slot];
                    let new_account = account_ids[account];
                    let new_amount = normalize_amount(transaction_type, amount);
                    for delta in update_deltas(old_account, old_amount, new_account, new_amount) {
                        *balances.get_mut(&delta.account_id).unwrap() += delta.amount;
                    }
                    live[slot] = (new_account, new_amount);
                }
                Op::Delete { slot } => {
                    if live.is_empty() {
                        continue;
                    }
                    let slot = slot % live.len();
                    let (account_id, amount) = live.swap_remove(slot);
                    let delta = deletion_delta(account_id, amount);
                    *balances.get_mut(&delta.account_id).unwrap() += delta.amount;
                }
            }

            // Invariant check after each operation.
            for account_id in &account_ids {
                let expected: Decimal = live
                    .iter()
                    .filter(|(a, _)| a == account_id)
                    .map(|(_, amount)| *amount)
                    .sum();
                prop_assert_eq!(balances[account_id], expected);
            }
        }
    }

    /// Normalization is idempotent: re-normalizing an already-normalized
    /// amount for the same type yields the same value.
    #[test]
    fn normalization_is_idempotent(
        transaction_type in transaction_type_strategy(),
        amount in amount_strategy(),
    ) {
        let once = normalize_amount(transaction_type, amount);
        let twice = normalize_amount(transaction_type, once);
        prop_assert_eq!(once, twice);
    }

    /// The stored sign always matches the transaction type.
    #[test]
    fn stored_sign_matches_type(
        transaction_type in transaction_type_strategy(),
        amount in amount_strategy(),
    ) {
        let stored = normalize_amount(transaction_type, amount);
        match transaction_type {
            TransactionType::Income => prop_assert!(stored >= Decimal::ZERO),
            TransactionType::Expense => prop_assert!(stored <= Decimal::ZERO),
        }
    }
}
