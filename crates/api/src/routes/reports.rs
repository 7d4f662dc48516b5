//! Financial report routes.
//!
//! Handlers fetch the user's rows through the repositories, map them into
//! the pure record types of `finbook_core::reports`, and let `ReportService`
//! do the folding.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;
use tracing::error;

use crate::routes::accounts::account_record;
use crate::routes::transactions::transaction_record;
use crate::{AppState, error, middleware::AuthUser};
use finbook_core::reports::{RecentTransaction, ReportPeriod, ReportService};
use finbook_db::repositories::account::AccountRepository;
use finbook_db::repositories::transaction::{TransactionFilter, TransactionRepository};

/// Number of recent transactions shown on the dashboard.
const RECENT_TRANSACTIONS: u64 = 5;

/// Creates the report routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/profit-loss", get(profit_loss))
        .route("/reports/balance-sheet", get(balance_sheet))
        .route("/reports/cash-flow", get(cash_flow))
        .route("/reports/trial-balance", get(trial_balance))
        .route("/reports/dashboard", get(dashboard))
}

/// Query parameters for period-based reports.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    /// Inclusive start date (YYYY-MM-DD).
    pub from: Option<NaiveDate>,
    /// Inclusive end date (YYYY-MM-DD).
    pub to: Option<NaiveDate>,
}

impl PeriodQuery {
    fn filter(&self) -> TransactionFilter {
        TransactionFilter {
            from: self.from,
            to: self.to,
            ..TransactionFilter::default()
        }
    }

    const fn period(&self) -> ReportPeriod {
        ReportPeriod {
            from: self.from,
            to: self.to,
        }
    }
}

/// Query parameters for point-in-time reports.
#[derive(Debug, Default, Deserialize)]
pub struct AsOfQuery {
    /// Report date (YYYY-MM-DD, default: today).
    pub as_of: Option<NaiveDate>,
}

impl AsOfQuery {
    fn as_of(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Utc::now().date_naive())
    }
}

/// GET /reports/profit-loss - Income and expenses by category.
async fn profit_loss(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PeriodQuery>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.list_for_period(auth.user_id(), &query.filter()).await {
        Ok(models) => {
            let records: Vec<_> = models.iter().map(transaction_record).collect();
            let report = ReportService::profit_and_loss(&records, query.period());
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to build profit & loss report");
            error::respond(&error::transaction_error(&e))
        }
    }
}

/// GET /reports/balance-sheet - Assets, liabilities, and equity.
async fn balance_sheet(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<AsOfQuery>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.list_active_ordered(auth.user_id()).await {
        Ok(accounts) => {
            let records: Vec<_> = accounts.into_iter().map(account_record).collect();
            let report = ReportService::balance_sheet(&records, query.as_of());
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to build balance sheet");
            error::respond(&error::account_error(&e))
        }
    }
}

/// GET /reports/cash-flow - Operating inflows and outflows.
async fn cash_flow(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PeriodQuery>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.list_for_period(auth.user_id(), &query.filter()).await {
        Ok(models) => {
            let records: Vec<_> = models.iter().map(transaction_record).collect();
            let report = ReportService::cash_flow(&records, query.period());
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to build cash flow report");
            error::respond(&error::transaction_error(&e))
        }
    }
}

/// GET /reports/trial-balance - Debit and credit columns per account.
async fn trial_balance(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<AsOfQuery>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.list_active_ordered(auth.user_id()).await {
        Ok(accounts) => {
            let records: Vec<_> = accounts.into_iter().map(account_record).collect();
            let report = ReportService::trial_balance(&records, query.as_of());
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to build trial balance");
            error::respond(&error::account_error(&e))
        }
    }
}

/// GET /reports/dashboard - Current-month totals, balance buckets, and
/// recent activity.
async fn dashboard(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let account_repo = AccountRepository::new((*state.db).clone());
    let transaction_repo = TransactionRepository::new((*state.db).clone());
    let user_id = auth.user_id();

    let accounts = match account_repo.list_active_ordered(user_id).await {
        Ok(a) => a,
        Err(e) => {
            error!(error = %e, "Failed to load accounts for dashboard");
            return error::respond(&error::account_error(&e));
        }
    };

    let monthly_filter = current_month_filter(Utc::now().date_naive());

    let monthly = match transaction_repo
        .list_for_period(user_id, &monthly_filter)
        .await
    {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to load monthly transactions for dashboard");
            return error::respond(&error::transaction_error(&e));
        }
    };

    let recent = match transaction_repo
        .recent_transactions(user_id, RECENT_TRANSACTIONS)
        .await
    {
        Ok(rows) => rows
            .into_iter()
            .map(|(transaction, account)| RecentTransaction {
                id: transaction.id,
                date: transaction.date,
                description: transaction.description,
                amount: transaction.amount,
                transaction_type: transaction.transaction_type.into(),
                category: transaction.category,
                status: transaction.status.into(),
                account_name: account.map(|a| a.name).unwrap_or_default(),
            })
            .collect(),
        Err(e) => {
            error!(error = %e, "Failed to load recent transactions for dashboard");
            return error::respond(&error::transaction_error(&e));
        }
    };

    let account_records: Vec<_> = accounts.into_iter().map(account_record).collect();
    let monthly_records: Vec<_> = monthly.iter().map(transaction_record).collect();

    let summary = ReportService::dashboard_summary(&account_records, &monthly_records, recent);
    (StatusCode::OK, Json(summary)).into_response()
}

/// Window for the dashboard's monthly totals: from the first of the current
/// month, with no upper bound so forward-dated entries still count.
fn current_month_filter(today: NaiveDate) -> TransactionFilter {
    TransactionFilter {
        from: Some(today.with_day(1).unwrap_or(today)),
        to: None,
        ..TransactionFilter::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_month_filter_is_open_ended() {
        let filter = current_month_filter(NaiveDate::from_ymd_opt(2026, 5, 20).unwrap());
        assert_eq!(filter.from, NaiveDate::from_ymd_opt(2026, 5, 1));
        assert_eq!(filter.to, None);
    }
}
