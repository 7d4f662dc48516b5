//! Report data types.
//!
//! Input records carry only the fields the folds read; the caller maps its
//! storage models into them. Output types serialize with decimals as strings
//! (the API's JSON convention).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ledger::{AccountType, TransactionStatus, TransactionType};

/// Account fields consumed by report folds.
///
/// Callers pass only active accounts; soft-deleted accounts never reach a
/// report.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    /// Display name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Current stored balance.
    pub balance: Decimal,
}

/// Transaction fields consumed by report folds.
///
/// Amounts are sign-normalized: positive for income, negative for expenses.
#[derive(Debug, Clone)]
pub struct TransactionRecord {
    /// Transaction date.
    pub date: NaiveDate,
    /// Signed, normalized amount.
    pub amount: Decimal,
    /// Income or expense.
    pub transaction_type: TransactionType,
    /// Free-text category; open-ended key set.
    pub category: String,
    /// Settlement status.
    pub status: TransactionStatus,
}

/// Reporting window. `None` bounds are open-ended.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ReportPeriod {
    /// Inclusive start date.
    pub from: Option<NaiveDate>,
    /// Inclusive end date.
    pub to: Option<NaiveDate>,
}

/// Totals accumulated per free-text category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryTotals {
    /// Per-category accumulated amounts (unique keys, summed).
    pub categories: BTreeMap<String, Decimal>,
    /// Sum across all categories.
    pub total: Decimal,
}

impl CategoryTotals {
    /// Accumulates an amount under a category key.
    pub fn add(&mut self, category: &str, amount: Decimal) {
        *self
            .categories
            .entry(category.to_string())
            .or_insert(Decimal::ZERO) += amount;
        self.total += amount;
    }
}

/// Profit & Loss report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitLossReport {
    /// Report type identifier.
    pub report_type: String,
    /// Reporting window.
    pub period: ReportPeriod,
    /// Income by category.
    pub income: CategoryTotals,
    /// Expenses by category (absolute values).
    pub expenses: CategoryTotals,
    /// `income.total - expenses.total`.
    pub net_income: Decimal,
}

/// One account line in a balance sheet section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountLine {
    /// Account name.
    pub name: String,
    /// Reported balance (liabilities are absolute values).
    pub balance: Decimal,
}

/// Balance sheet section (assets, liabilities, or equity).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceSheetSection {
    /// Section total.
    pub total: Decimal,
    /// Accounts in this section.
    pub accounts: Vec<AccountLine>,
}

impl BalanceSheetSection {
    pub(crate) fn push(&mut self, name: &str, balance: Decimal) {
        self.total += balance;
        self.accounts.push(AccountLine {
            name: name.to_string(),
            balance,
        });
    }
}

/// Balance sheet report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    /// Report type identifier.
    pub report_type: String,
    /// Report date.
    pub as_of: NaiveDate,
    /// Assets section.
    pub assets: BalanceSheetSection,
    /// Liabilities section (absolute values).
    pub liabilities: BalanceSheetSection,
    /// Equity section.
    pub equity: BalanceSheetSection,
    /// `liabilities.total + equity.total`.
    pub total_liabilities_and_equity: Decimal,
}

/// Operating cash movement for the cash flow report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperatingActivities {
    /// Sum of positive amounts.
    pub cash_inflows: Decimal,
    /// Sum of absolute negative amounts.
    pub cash_outflows: Decimal,
    /// `cash_inflows - cash_outflows`.
    pub net_cash_flow: Decimal,
}

/// Cash flow summary block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CashFlowSummary {
    /// Opening balance for the window (always zero in this design).
    pub beginning_balance: Decimal,
    /// Total inflows.
    pub total_inflows: Decimal,
    /// Total outflows.
    pub total_outflows: Decimal,
    /// `beginning_balance + total_inflows - total_outflows`.
    pub ending_balance: Decimal,
}

/// Cash flow report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowReport {
    /// Report type identifier.
    pub report_type: String,
    /// Reporting window.
    pub period: ReportPeriod,
    /// Operating cash movement.
    pub operating_activities: OperatingActivities,
    /// Summary block.
    pub summary: CashFlowSummary,
}

/// One account row in the trial balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Debit column (`balance` when non-negative, else 0).
    pub debit: Decimal,
    /// Credit column (`abs(balance)` when negative, else 0).
    pub credit: Decimal,
}

/// Trial balance column totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Debit column sum.
    pub debit: Decimal,
    /// Credit column sum.
    pub credit: Decimal,
}

/// Trial balance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// Report type identifier.
    pub report_type: String,
    /// Report date.
    pub as_of: NaiveDate,
    /// Account rows, in caller-supplied order (type, then name).
    pub accounts: Vec<TrialBalanceRow>,
    /// Column totals.
    pub totals: TrialBalanceTotals,
}

/// Account balance buckets on the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountBalances {
    /// Balances of accounts whose name contains "cash" (case-insensitive).
    pub cash: Decimal,
    /// Balances of accounts whose name contains "bank" (case-insensitive).
    pub bank: Decimal,
    /// Sum of asset account balances.
    pub total_assets: Decimal,
    /// Sum of absolute liability account balances.
    pub total_liabilities: Decimal,
}

/// A recently created transaction shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentTransaction {
    /// Transaction ID.
    pub id: Uuid,
    /// Transaction date.
    pub date: NaiveDate,
    /// Description.
    pub description: String,
    /// Signed amount.
    pub amount: Decimal,
    /// Income or expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Category.
    pub category: String,
    /// Settlement status.
    pub status: TransactionStatus,
    /// Name of the referenced account.
    pub account_name: String,
}

/// Dashboard summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// This month's income total.
    pub total_revenue: Decimal,
    /// This month's expense total (absolute).
    pub total_expenses: Decimal,
    /// `total_revenue - total_expenses`.
    pub net_profit: Decimal,
    /// Count of this month's pending transactions.
    pub pending_invoices: u64,
    /// Balance buckets across active accounts.
    pub account_balances: AccountBalances,
    /// The 5 most-recently created transactions (not month-scoped).
    pub recent_transactions: Vec<RecentTransaction>,
}

/// Account summary across all active accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummary {
    /// Sum of asset balances.
    pub total_assets: Decimal,
    /// Sum of absolute liability balances.
    pub total_liabilities: Decimal,
    /// Sum of equity balances.
    pub total_equity: Decimal,
    /// Number of accounts included.
    pub account_count: u64,
    /// `total_assets - total_liabilities`.
    pub net_worth: Decimal,
}

/// Transaction summary over a filtered window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionSummary {
    /// Income total.
    pub total_income: Decimal,
    /// Expense total (absolute).
    pub total_expense: Decimal,
    /// `total_income - total_expense`.
    pub net_amount: Decimal,
    /// Number of transactions included.
    pub transaction_count: u64,
}
