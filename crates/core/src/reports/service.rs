//! Report generation service.
//!
//! Every function is a single-pass fold over records the caller has already
//! scoped to one owner and one time window. No function mutates its input or
//! raises domain errors; malformed input is a precondition violation.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::ledger::{AccountType, TransactionType};

use super::types::{
    AccountBalances, AccountRecord, AccountSummary, BalanceSheetReport, BalanceSheetSection,
    CashFlowReport, CashFlowSummary, CategoryTotals, DashboardSummary, OperatingActivities,
    ProfitLossReport, RecentTransaction, ReportPeriod, TransactionRecord, TransactionSummary,
    TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals,
};

/// Service for generating financial reports.
pub struct ReportService;

impl ReportService {
    /// Generates a profit & loss report.
    ///
    /// Income amounts accumulate as stored; expense amounts accumulate as
    /// absolute values, so both sides of the report read positive.
    #[must_use]
    pub fn profit_and_loss(
        transactions: &[TransactionRecord],
        period: ReportPeriod,
    ) -> ProfitLossReport {
        let mut income = CategoryTotals::default();
        let mut expenses = CategoryTotals::default();

        for transaction in transactions {
            match transaction.transaction_type {
                TransactionType::Income => income.add(&transaction.category, transaction.amount),
                TransactionType::Expense => {
                    expenses.add(&transaction.category, transaction.amount.abs());
                }
            }
        }

        let net_income = income.total - expenses.total;

        ProfitLossReport {
            report_type: "profit_and_loss".to_string(),
            period,
            income,
            expenses,
            net_income,
        }
    }

    /// Generates a balance sheet from active accounts.
    ///
    /// Revenue and expense accounts are not placed in any bucket; liability
    /// balances are reported as absolute values.
    #[must_use]
    pub fn balance_sheet(accounts: &[AccountRecord], as_of: NaiveDate) -> BalanceSheetReport {
        let mut assets = BalanceSheetSection::default();
        let mut liabilities = BalanceSheetSection::default();
        let mut equity = BalanceSheetSection::default();

        for account in accounts.iter().filter(|a| a.account_type.on_balance_sheet()) {
            let (section, balance) = match account.account_type {
                AccountType::Asset => (&mut assets, account.balance),
                AccountType::Liability => (&mut liabilities, account.balance.abs()),
                _ => (&mut equity, account.balance),
            };
            section.push(&account.name, balance);
        }

        let total_liabilities_and_equity = liabilities.total + equity.total;

        BalanceSheetReport {
            report_type: "balance_sheet".to_string(),
            as_of,
            assets,
            liabilities,
            equity,
            total_liabilities_and_equity,
        }
    }

    /// Generates a cash flow report.
    ///
    /// Classification is by amount sign, not transaction type: positive
    /// amounts are inflows, everything else contributes its absolute value
    /// to outflows.
    #[must_use]
    pub fn cash_flow(transactions: &[TransactionRecord], period: ReportPeriod) -> CashFlowReport {
        let mut operating = OperatingActivities::default();

        for transaction in transactions {
            if transaction.amount > Decimal::ZERO {
                operating.cash_inflows += transaction.amount;
            } else {
                operating.cash_outflows += transaction.amount.abs();
            }
        }

        operating.net_cash_flow = operating.cash_inflows - operating.cash_outflows;

        let beginning_balance = Decimal::ZERO;
        let summary = CashFlowSummary {
            beginning_balance,
            total_inflows: operating.cash_inflows,
            total_outflows: operating.cash_outflows,
            ending_balance: beginning_balance + operating.cash_inflows - operating.cash_outflows,
        };

        CashFlowReport {
            report_type: "cash_flow".to_string(),
            period,
            operating_activities: operating,
            summary,
        }
    }

    /// Generates a trial balance from active accounts.
    ///
    /// Non-negative balances fill the debit column, negative balances fill
    /// the credit column as absolute values; row order is preserved from the
    /// caller (type, then name).
    #[must_use]
    pub fn trial_balance(accounts: &[AccountRecord], as_of: NaiveDate) -> TrialBalanceReport {
        let mut rows = Vec::with_capacity(accounts.len());
        let mut totals = TrialBalanceTotals::default();

        for account in accounts {
            let (debit, credit) = if account.balance >= Decimal::ZERO {
                (account.balance, Decimal::ZERO)
            } else {
                (Decimal::ZERO, account.balance.abs())
            };

            totals.debit += debit;
            totals.credit += credit;
            rows.push(TrialBalanceRow {
                name: account.name.clone(),
                account_type: account.account_type,
                debit,
                credit,
            });
        }

        TrialBalanceReport {
            report_type: "trial_balance".to_string(),
            as_of,
            accounts: rows,
            totals,
        }
    }

    /// Generates the dashboard summary.
    ///
    /// `monthly` holds the current calendar month's transactions; `recent`
    /// holds the 5 most-recently created transactions regardless of month.
    #[must_use]
    pub fn dashboard_summary(
        accounts: &[AccountRecord],
        monthly: &[TransactionRecord],
        recent: Vec<RecentTransaction>,
    ) -> DashboardSummary {
        let mut total_revenue = Decimal::ZERO;
        let mut total_expenses = Decimal::ZERO;
        let mut pending_invoices = 0u64;

        for transaction in monthly {
            match transaction.transaction_type {
                TransactionType::Income => total_revenue += transaction.amount,
                TransactionType::Expense => total_expenses += transaction.amount.abs(),
            }
            if transaction.status.is_pending() {
                pending_invoices += 1;
            }
        }

        let mut balances = AccountBalances::default();
        for account in accounts {
            let name = account.name.to_lowercase();
            if name.contains("cash") {
                balances.cash += account.balance;
            } else if name.contains("bank") {
                balances.bank += account.balance;
            }

            match account.account_type {
                AccountType::Asset => balances.total_assets += account.balance,
                AccountType::Liability => balances.total_liabilities += account.balance.abs(),
                _ => {}
            }
        }

        DashboardSummary {
            total_revenue,
            total_expenses,
            net_profit: total_revenue - total_expenses,
            pending_invoices,
            account_balances: balances,
            recent_transactions: recent,
        }
    }

    /// Summarizes active accounts by type.
    #[must_use]
    pub fn account_summary(accounts: &[AccountRecord]) -> AccountSummary {
        let mut summary = AccountSummary {
            total_assets: Decimal::ZERO,
            total_liabilities: Decimal::ZERO,
            total_equity: Decimal::ZERO,
            account_count: accounts.len() as u64,
            net_worth: Decimal::ZERO,
        };

        for account in accounts {
            match account.account_type {
                AccountType::Asset => summary.total_assets += account.balance,
                AccountType::Liability => summary.total_liabilities += account.balance.abs(),
                AccountType::Equity => summary.total_equity += account.balance,
                AccountType::Revenue | AccountType::Expense => {}
            }
        }

        summary.net_worth = summary.total_assets - summary.total_liabilities;
        summary
    }

    /// Summarizes a filtered transaction window.
    #[must_use]
    pub fn transaction_summary(transactions: &[TransactionRecord]) -> TransactionSummary {
        let mut total_income = Decimal::ZERO;
        let mut total_expense = Decimal::ZERO;

        for transaction in transactions {
            match transaction.transaction_type {
                TransactionType::Income => total_income += transaction.amount,
                TransactionType::Expense => total_expense += transaction.amount.abs(),
            }
        }

        TransactionSummary {
            total_income,
            total_expense,
            net_amount: total_income - total_expense,
            transaction_count: transactions.len() as u64,
        }
    }
}
