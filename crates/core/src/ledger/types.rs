//! Ledger domain types.

use serde::{Deserialize, Serialize};

/// Account classification, a closed enumeration.
///
/// Balance-sheet reports bucket by `Asset`/`Liability`/`Equity`;
/// `Revenue`/`Expense` accounts appear only in the trial balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Resources the business owns.
    Asset,
    /// Obligations the business owes.
    Liability,
    /// Owner's residual interest.
    Equity,
    /// Income-generating accounts.
    Revenue,
    /// Cost-generating accounts.
    Expense,
}

impl AccountType {
    /// Returns true if this type appears in the balance sheet.
    #[must_use]
    pub const fn on_balance_sheet(&self) -> bool {
        matches!(self, Self::Asset | Self::Liability | Self::Equity)
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asset => write!(f, "asset"),
            Self::Liability => write!(f, "liability"),
            Self::Equity => write!(f, "equity"),
            Self::Revenue => write!(f, "revenue"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asset" => Ok(Self::Asset),
            "liability" => Ok(Self::Liability),
            "equity" => Ok(Self::Equity),
            "revenue" => Ok(Self::Revenue),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown account type: {s}")),
        }
    }
}

/// Transaction classification.
///
/// The stored amount's sign always agrees with the type:
/// positive for `Income`, negative for `Expense`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {s}")),
        }
    }
}

/// Transaction settlement status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Awaiting settlement; counted as a pending invoice on the dashboard.
    Pending,
    /// Settled.
    Completed,
}

impl TransactionStatus {
    /// Returns true if the transaction is still pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("Unknown transaction status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_account_type_roundtrip() {
        for t in [
            AccountType::Asset,
            AccountType::Liability,
            AccountType::Equity,
            AccountType::Revenue,
            AccountType::Expense,
        ] {
            assert_eq!(AccountType::from_str(&t.to_string()).unwrap(), t);
        }
        assert!(AccountType::from_str("cashmoney").is_err());
    }

    #[test]
    fn test_balance_sheet_membership() {
        assert!(AccountType::Asset.on_balance_sheet());
        assert!(AccountType::Liability.on_balance_sheet());
        assert!(AccountType::Equity.on_balance_sheet());
        assert!(!AccountType::Revenue.on_balance_sheet());
        assert!(!AccountType::Expense.on_balance_sheet());
    }

    #[test]
    fn test_status_is_pending() {
        assert!(TransactionStatus::Pending.is_pending());
        assert!(!TransactionStatus::Completed.is_pending());
    }

    #[test]
    fn test_type_order_for_trial_balance() {
        // Trial balance orders accounts by type then name; the derived
        // ordering must follow declaration order.
        assert!(AccountType::Asset < AccountType::Liability);
        assert!(AccountType::Liability < AccountType::Equity);
        assert!(AccountType::Equity < AccountType::Revenue);
        assert!(AccountType::Revenue < AccountType::Expense);
    }
}
