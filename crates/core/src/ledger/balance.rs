//! Balance maintenance for accounts.
//!
//! Every account's stored balance must equal its opening balance plus the
//! signed sum of its live transactions' amounts. This module computes the
//! balance deltas for each transaction mutation; the persistence layer
//! applies them as single-statement atomic increments so that concurrent
//! mutations against the same account cannot lose an update.

use rust_decimal::Decimal;
use uuid::Uuid;

use super::types::TransactionType;

/// Normalizes a caller-supplied amount by transaction type.
///
/// Stored amounts are positive for income and negative for expenses,
/// regardless of the sign the caller passed in. Idempotent: normalizing an
/// already-normalized amount for the same type yields the same value.
#[must_use]
pub fn normalize_amount(transaction_type: TransactionType, amount: Decimal) -> Decimal {
    match transaction_type {
        TransactionType::Income => amount.abs(),
        TransactionType::Expense => -amount.abs(),
    }
}

/// A signed balance adjustment against one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceDelta {
    /// The account whose balance changes.
    pub account_id: Uuid,
    /// The signed amount to add to the account's balance.
    pub amount: Decimal,
}

/// Delta applied when a transaction is created.
///
/// `stored_amount` must already be normalized via [`normalize_amount`].
#[must_use]
pub const fn creation_delta(account_id: Uuid, stored_amount: Decimal) -> BalanceDelta {
    BalanceDelta {
        account_id,
        amount: stored_amount,
    }
}

/// Deltas applied when a transaction is updated.
///
/// Two-phase: revert the old amount from the old account, apply the new
/// amount to the (possibly different) target account. When the account is
/// unchanged the two phases net into a single delta so only one row is
/// touched.
#[must_use]
pub fn update_deltas(
    old_account_id: Uuid,
    old_amount: Decimal,
    new_account_id: Uuid,
    new_amount: Decimal,
) -> Vec<BalanceDelta> {
    if old_account_id == new_account_id {
        vec![BalanceDelta {
            account_id: old_account_id,
            amount: new_amount - old_amount,
        }]
    } else {
        vec![
            BalanceDelta {
                account_id: old_account_id,
                amount: -old_amount,
            },
            BalanceDelta {
                account_id: new_account_id,
                amount: new_amount,
            },
        ]
    }
}

/// Delta applied when a transaction is deleted.
#[must_use]
pub fn deletion_delta(account_id: Uuid, stored_amount: Decimal) -> BalanceDelta {
    BalanceDelta {
        account_id,
        amount: -stored_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_normalize_income_positive() {
        assert_eq!(
            normalize_amount(TransactionType::Income, dec!(1000)),
            dec!(1000)
        );
        assert_eq!(
            normalize_amount(TransactionType::Income, dec!(-1000)),
            dec!(1000)
        );
    }

    #[test]
    fn test_normalize_expense_negative() {
        assert_eq!(
            normalize_amount(TransactionType::Expense, dec!(250.50)),
            dec!(-250.50)
        );
        assert_eq!(
            normalize_amount(TransactionType::Expense, dec!(-250.50)),
            dec!(-250.50)
        );
    }

    #[test]
    fn test_update_same_account_nets_single_delta() {
        let account = Uuid::new_v4();
        let deltas = update_deltas(account, dec!(200), account, dec!(350));
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].account_id, account);
        assert_eq!(deltas[0].amount, dec!(150));
    }

    #[test]
    fn test_update_moved_account_two_deltas() {
        // Re-pointing a 200 income transaction from A (500) to B (0)
        // leaves A at 300 and B at 200.
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let deltas = update_deltas(a, dec!(200), b, dec!(200));
        assert_eq!(deltas.len(), 2);

        let mut balance_a = dec!(500);
        let mut balance_b = dec!(0);
        for d in &deltas {
            if d.account_id == a {
                balance_a += d.amount;
            } else {
                balance_b += d.amount;
            }
        }
        assert_eq!(balance_a, dec!(300));
        assert_eq!(balance_b, dec!(200));
    }

    #[test]
    fn test_income_flip_to_expense_then_delete() {
        // Income 1000 -> balance 1000; flip to expense 1000 -> -1000;
        // delete -> 0.
        let account = Uuid::new_v4();
        let mut balance = dec!(0);

        let stored = normalize_amount(TransactionType::Income, dec!(1000));
        balance += creation_delta(account, stored).amount;
        assert_eq!(balance, dec!(1000));

        let flipped = normalize_amount(TransactionType::Expense, dec!(1000));
        for d in update_deltas(account, stored, account, flipped) {
            balance += d.amount;
        }
        assert_eq!(balance, dec!(-1000));

        balance += deletion_delta(account, flipped).amount;
        assert_eq!(balance, dec!(0));
    }
}
