//! Database-backed enum types.
//!
//! These mirror the domain enums in `finbook-core`; the `From` impls convert
//! at the repository boundary so the core crate stays free of `SeaORM`.

use finbook_core::ledger;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account classification stored in the `account_type` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account.
    #[sea_orm(string_value = "asset")]
    Asset,
    /// Liability account.
    #[sea_orm(string_value = "liability")]
    Liability,
    /// Equity account.
    #[sea_orm(string_value = "equity")]
    Equity,
    /// Revenue account.
    #[sea_orm(string_value = "revenue")]
    Revenue,
    /// Expense account.
    #[sea_orm(string_value = "expense")]
    Expense,
}

/// Transaction direction stored in the `transaction_type` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_type")]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money in.
    #[sea_orm(string_value = "income")]
    Income,
    /// Money out.
    #[sea_orm(string_value = "expense")]
    Expense,
}

/// Settlement status stored in the `transaction_status` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_status")]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Awaiting settlement.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Settled.
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl From<ledger::AccountType> for AccountType {
    fn from(value: ledger::AccountType) -> Self {
        match value {
            ledger::AccountType::Asset => Self::Asset,
            ledger::AccountType::Liability => Self::Liability,
            ledger::AccountType::Equity => Self::Equity,
            ledger::AccountType::Revenue => Self::Revenue,
            ledger::AccountType::Expense => Self::Expense,
        }
    }
}

impl From<AccountType> for ledger::AccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Asset => Self::Asset,
            AccountType::Liability => Self::Liability,
            AccountType::Equity => Self::Equity,
            AccountType::Revenue => Self::Revenue,
            AccountType::Expense => Self::Expense,
        }
    }
}

impl From<ledger::TransactionType> for TransactionType {
    fn from(value: ledger::TransactionType) -> Self {
        match value {
            ledger::TransactionType::Income => Self::Income,
            ledger::TransactionType::Expense => Self::Expense,
        }
    }
}

impl From<TransactionType> for ledger::TransactionType {
    fn from(value: TransactionType) -> Self {
        match value {
            TransactionType::Income => Self::Income,
            TransactionType::Expense => Self::Expense,
        }
    }
}

impl From<ledger::TransactionStatus> for TransactionStatus {
    fn from(value: ledger::TransactionStatus) -> Self {
        match value {
            ledger::TransactionStatus::Pending => Self::Pending,
            ledger::TransactionStatus::Completed => Self::Completed,
        }
    }
}

impl From<TransactionStatus> for ledger::TransactionStatus {
    fn from(value: TransactionStatus) -> Self {
        match value {
            TransactionStatus::Pending => Self::Pending,
            TransactionStatus::Completed => Self::Completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ledger::AccountType::Asset)]
    #[case(ledger::AccountType::Liability)]
    #[case(ledger::AccountType::Equity)]
    #[case(ledger::AccountType::Revenue)]
    #[case(ledger::AccountType::Expense)]
    fn test_account_type_roundtrip(#[case] domain: ledger::AccountType) {
        let stored = AccountType::from(domain);
        assert_eq!(ledger::AccountType::from(stored), domain);
    }

    #[rstest]
    #[case(ledger::TransactionType::Income)]
    #[case(ledger::TransactionType::Expense)]
    fn test_transaction_type_roundtrip(#[case] domain: ledger::TransactionType) {
        let stored = TransactionType::from(domain);
        assert_eq!(ledger::TransactionType::from(stored), domain);
    }

    #[rstest]
    #[case(ledger::TransactionStatus::Pending)]
    #[case(ledger::TransactionStatus::Completed)]
    fn test_transaction_status_roundtrip(#[case] domain: ledger::TransactionStatus) {
        let stored = TransactionStatus::from(domain);
        assert_eq!(ledger::TransactionStatus::from(stored), domain);
    }
}
