//! Tests for report generation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::ledger::{AccountType, TransactionStatus, TransactionType, normalize_amount};

use super::service::ReportService;
use super::types::{AccountRecord, RecentTransaction, ReportPeriod, TransactionRecord};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn transaction(
    transaction_type: TransactionType,
    amount: Decimal,
    category: &str,
    status: TransactionStatus,
) -> TransactionRecord {
    TransactionRecord {
        date: day(2026, 5, 20),
        amount: normalize_amount(transaction_type, amount),
        transaction_type,
        category: category.to_string(),
        status,
    }
}

fn account(name: &str, account_type: AccountType, balance: Decimal) -> AccountRecord {
    AccountRecord {
        name: name.to_string(),
        account_type,
        balance,
    }
}

#[test]
fn test_profit_loss_empty_input() {
    let report = ReportService::profit_and_loss(&[], ReportPeriod::default());
    assert_eq!(report.income.total, Decimal::ZERO);
    assert_eq!(report.expenses.total, Decimal::ZERO);
    assert_eq!(report.net_income, Decimal::ZERO);
    assert!(report.income.categories.is_empty());
}

#[test]
fn test_profit_loss_accumulates_by_category() {
    let transactions = vec![
        transaction(
            TransactionType::Income,
            dec!(1000),
            "Sales",
            TransactionStatus::Completed,
        ),
        transaction(
            TransactionType::Income,
            dec!(500),
            "Sales",
            TransactionStatus::Completed,
        ),
        transaction(
            TransactionType::Income,
            dec!(250),
            "Consulting",
            TransactionStatus::Completed,
        ),
        transaction(
            TransactionType::Expense,
            dec!(300),
            "Rent",
            TransactionStatus::Completed,
        ),
    ];

    let report = ReportService::profit_and_loss(&transactions, ReportPeriod::default());

    assert_eq!(report.income.categories["Sales"], dec!(1500));
    assert_eq!(report.income.categories["Consulting"], dec!(250));
    assert_eq!(report.income.total, dec!(1750));
    // Expenses read positive even though stored amounts are negative.
    assert_eq!(report.expenses.categories["Rent"], dec!(300));
    assert_eq!(report.expenses.total, dec!(300));
    assert_eq!(report.net_income, dec!(1450));
}

#[test]
fn test_balance_sheet_buckets() {
    // Liability balances are stored negative but reported as positive.
    let accounts = vec![
        account("Checking", AccountType::Asset, dec!(100)),
        account("Loan", AccountType::Liability, dec!(-40)),
        account("Capital", AccountType::Equity, dec!(60)),
    ];

    let report = ReportService::balance_sheet(&accounts, day(2026, 5, 20));

    assert_eq!(report.assets.total, dec!(100));
    assert_eq!(report.liabilities.total, dec!(40));
    assert_eq!(report.equity.total, dec!(60));
    assert_eq!(report.total_liabilities_and_equity, dec!(100));
}

#[test]
fn test_balance_sheet_skips_revenue_and_expense_accounts() {
    let accounts = vec![
        account("Sales", AccountType::Revenue, dec!(900)),
        account("Payroll", AccountType::Expense, dec!(-400)),
    ];

    let report = ReportService::balance_sheet(&accounts, day(2026, 5, 20));

    assert!(report.assets.accounts.is_empty());
    assert!(report.liabilities.accounts.is_empty());
    assert!(report.equity.accounts.is_empty());
    assert_eq!(report.total_liabilities_and_equity, Decimal::ZERO);
}

#[test]
fn test_cash_flow_classifies_by_sign() {
    let transactions = vec![
        transaction(
            TransactionType::Income,
            dec!(800),
            "Sales",
            TransactionStatus::Completed,
        ),
        transaction(
            TransactionType::Expense,
            dec!(300),
            "Rent",
            TransactionStatus::Completed,
        ),
    ];

    let report = ReportService::cash_flow(&transactions, ReportPeriod::default());

    assert_eq!(report.operating_activities.cash_inflows, dec!(800));
    assert_eq!(report.operating_activities.cash_outflows, dec!(300));
    assert_eq!(report.operating_activities.net_cash_flow, dec!(500));
    assert_eq!(report.summary.beginning_balance, Decimal::ZERO);
    assert_eq!(report.summary.ending_balance, dec!(500));
}

#[test]
fn test_trial_balance_columns() {
    let accounts = vec![
        account("Checking", AccountType::Asset, dec!(750)),
        account("Credit Card", AccountType::Liability, dec!(-200)),
        account("Capital", AccountType::Equity, dec!(0)),
    ];

    let report = ReportService::trial_balance(&accounts, day(2026, 5, 20));

    assert_eq!(report.accounts[0].debit, dec!(750));
    assert_eq!(report.accounts[0].credit, Decimal::ZERO);
    assert_eq!(report.accounts[1].debit, Decimal::ZERO);
    assert_eq!(report.accounts[1].credit, dec!(200));
    // Zero balance lands in the debit column.
    assert_eq!(report.accounts[2].debit, Decimal::ZERO);
    assert_eq!(report.accounts[2].credit, Decimal::ZERO);
    assert_eq!(report.totals.debit, dec!(750));
    assert_eq!(report.totals.credit, dec!(200));
}

#[test]
fn test_dashboard_summary() {
    let accounts = vec![
        account("Petty Cash", AccountType::Asset, dec!(150)),
        account("Main Bank Account", AccountType::Asset, dec!(2000)),
        account("Supplier Credit", AccountType::Liability, dec!(-500)),
    ];
    let monthly = vec![
        transaction(
            TransactionType::Income,
            dec!(1200),
            "Sales",
            TransactionStatus::Completed,
        ),
        transaction(
            TransactionType::Income,
            dec!(400),
            "Sales",
            TransactionStatus::Pending,
        ),
        transaction(
            TransactionType::Expense,
            dec!(350),
            "Rent",
            TransactionStatus::Completed,
        ),
    ];
    let recent = vec![RecentTransaction {
        id: Uuid::new_v4(),
        date: day(2026, 5, 19),
        description: "Latest sale".to_string(),
        amount: dec!(1200),
        transaction_type: TransactionType::Income,
        category: "Sales".to_string(),
        status: TransactionStatus::Completed,
        account_name: "Main Bank Account".to_string(),
    }];

    let summary = ReportService::dashboard_summary(&accounts, &monthly, recent);

    assert_eq!(summary.total_revenue, dec!(1600));
    assert_eq!(summary.total_expenses, dec!(350));
    assert_eq!(summary.net_profit, dec!(1250));
    assert_eq!(summary.pending_invoices, 1);
    // Name buckets are case-insensitive substring matches.
    assert_eq!(summary.account_balances.cash, dec!(150));
    assert_eq!(summary.account_balances.bank, dec!(2000));
    assert_eq!(summary.account_balances.total_assets, dec!(2150));
    assert_eq!(summary.account_balances.total_liabilities, dec!(500));
    assert_eq!(summary.recent_transactions.len(), 1);
}

#[test]
fn test_account_summary_net_worth() {
    let accounts = vec![
        account("Checking", AccountType::Asset, dec!(1000)),
        account("Loan", AccountType::Liability, dec!(-400)),
        account("Capital", AccountType::Equity, dec!(600)),
        account("Sales", AccountType::Revenue, dec!(900)),
    ];

    let summary = ReportService::account_summary(&accounts);

    assert_eq!(summary.total_assets, dec!(1000));
    assert_eq!(summary.total_liabilities, dec!(400));
    assert_eq!(summary.total_equity, dec!(600));
    assert_eq!(summary.account_count, 4);
    assert_eq!(summary.net_worth, dec!(600));
}

#[test]
fn test_transaction_summary() {
    let transactions = vec![
        transaction(
            TransactionType::Income,
            dec!(900),
            "Sales",
            TransactionStatus::Completed,
        ),
        transaction(
            TransactionType::Expense,
            dec!(250),
            "Travel",
            TransactionStatus::Completed,
        ),
    ];

    let summary = ReportService::transaction_summary(&transactions);

    assert_eq!(summary.total_income, dec!(900));
    assert_eq!(summary.total_expense, dec!(250));
    assert_eq!(summary.net_amount, dec!(650));
    assert_eq!(summary.transaction_count, 2);
}

fn record_strategy() -> impl Strategy<Value = TransactionRecord> {
    (
        prop_oneof![
            Just(TransactionType::Income),
            Just(TransactionType::Expense)
        ],
        -1_000_000i64..1_000_000,
        0usize..6,
    )
        .prop_map(|(transaction_type, cents, category)| TransactionRecord {
            date: day(2026, 5, 20),
            amount: normalize_amount(transaction_type, Decimal::new(cents, 2)),
            transaction_type,
            category: format!("category-{category}"),
            status: TransactionStatus::Completed,
        })
}

fn account_strategy() -> impl Strategy<Value = AccountRecord> {
    (
        prop_oneof![
            Just(AccountType::Asset),
            Just(AccountType::Liability),
            Just(AccountType::Equity),
            Just(AccountType::Revenue),
            Just(AccountType::Expense),
        ],
        -1_000_000i64..1_000_000,
        0usize..100,
    )
        .prop_map(|(account_type, cents, n)| AccountRecord {
            name: format!("Account {n}"),
            account_type,
            balance: Decimal::new(cents, 2),
        })
}

proptest! {
    /// `net_income == income.total - expenses.total` for any input set, and
    /// category totals always sum to the side total.
    #[test]
    fn profit_loss_identity(transactions in prop::collection::vec(record_strategy(), 0..50)) {
        let report = ReportService::profit_and_loss(&transactions, ReportPeriod::default());

        prop_assert_eq!(report.net_income, report.income.total - report.expenses.total);

        let income_sum: Decimal = report.income.categories.values().copied().sum();
        let expense_sum: Decimal = report.expenses.categories.values().copied().sum();
        prop_assert_eq!(income_sum, report.income.total);
        prop_assert_eq!(expense_sum, report.expenses.total);
    }

    /// `totals.debit - totals.credit == sum(balance)` over included accounts
    /// for any sign distribution.
    #[test]
    fn trial_balance_identity(accounts in prop::collection::vec(account_strategy(), 0..40)) {
        let report = ReportService::trial_balance(&accounts, day(2026, 5, 20));

        let balance_sum: Decimal = accounts.iter().map(|a| a.balance).sum();
        prop_assert_eq!(report.totals.debit - report.totals.credit, balance_sum);
    }

    /// Cash flow inflows minus outflows always equals the signed amount sum.
    #[test]
    fn cash_flow_identity(transactions in prop::collection::vec(record_strategy(), 0..50)) {
        let report = ReportService::cash_flow(&transactions, ReportPeriod::default());

        let amount_sum: Decimal = transactions.iter().map(|t| t.amount).sum();
        prop_assert_eq!(report.operating_activities.net_cash_flow, amount_sum);
        prop_assert_eq!(report.summary.ending_balance, amount_sum);
    }
}
