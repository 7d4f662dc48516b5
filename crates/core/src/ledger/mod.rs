//! Account/transaction domain logic and balance maintenance.
//!
//! This module implements the bookkeeping core:
//! - Domain enums for accounts and transactions
//! - Sign normalization of transaction amounts
//! - Balance deltas applied on transaction create/update/delete
//! - Field validation for account and transaction inputs

pub mod balance;
pub mod types;
pub mod validation;

#[cfg(test)]
mod balance_props;

pub use balance::{BalanceDelta, creation_delta, deletion_delta, normalize_amount, update_deltas};
pub use types::{AccountType, TransactionStatus, TransactionType};
pub use validation::{
    ValidationError, validate_account_name, validate_category, validate_description,
    validate_transaction_fields,
};
