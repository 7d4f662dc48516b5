//! Transaction management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, error, middleware::AuthUser};
use finbook_core::ledger;
use finbook_core::reports::{ReportService, TransactionRecord};
use finbook_db::entities::transactions;
use finbook_db::repositories::transaction::{
    CreateTransactionInput, TransactionFilter, TransactionRepository, UpdateTransactionInput,
};
use finbook_shared::{PageRequest, PageResponse};

/// Creates the transaction routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions))
        .route("/transactions", post(create_transaction))
        .route("/transactions/summary", get(transaction_summary))
        .route("/transactions/{transaction_id}", get(get_transaction))
        .route("/transactions/{transaction_id}", put(update_transaction))
        .route("/transactions/{transaction_id}", delete(delete_transaction))
}

/// Query parameters for listing and summarizing transactions.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionQuery {
    /// Filter by direction.
    #[serde(rename = "type")]
    pub transaction_type: Option<ledger::TransactionType>,
    /// Case-insensitive substring match on category.
    pub category: Option<String>,
    /// Inclusive start date (YYYY-MM-DD).
    pub from: Option<NaiveDate>,
    /// Inclusive end date (YYYY-MM-DD).
    pub to: Option<NaiveDate>,
    /// Page number (1-indexed, default: 1).
    pub page: Option<u64>,
    /// Items per page (default: 10, max: 100).
    pub limit: Option<u64>,
}

impl TransactionQuery {
    fn filter(&self) -> TransactionFilter {
        TransactionFilter {
            transaction_type: self.transaction_type,
            category: self.category.clone(),
            from: self.from,
            to: self.to,
        }
    }

    fn page_request(&self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest {
            page: self.page.unwrap_or(defaults.page),
            limit: self.limit.unwrap_or(defaults.limit),
        }
        .clamped()
    }
}

/// Request body for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Account the money moves through.
    pub account_id: Uuid,
    /// Transaction date (default: today).
    pub date: Option<NaiveDate>,
    /// Description.
    pub description: String,
    /// Amount; the sign is derived from `type`.
    pub amount: Decimal,
    /// Direction: income or expense.
    #[serde(rename = "type")]
    pub transaction_type: ledger::TransactionType,
    /// Free-text category.
    pub category: String,
    /// Settlement status (default: completed).
    pub status: Option<ledger::TransactionStatus>,
    /// Optional external reference.
    pub reference: Option<String>,
}

/// Request body for updating a transaction.
#[derive(Debug, Deserialize)]
pub struct UpdateTransactionRequest {
    /// Move to a different account.
    pub account_id: Option<Uuid>,
    /// Transaction date.
    pub date: Option<NaiveDate>,
    /// Description.
    pub description: Option<String>,
    /// New amount (sign ignored).
    pub amount: Option<Decimal>,
    /// New direction.
    #[serde(rename = "type")]
    pub transaction_type: Option<ledger::TransactionType>,
    /// Category.
    pub category: Option<String>,
    /// Settlement status.
    pub status: Option<ledger::TransactionStatus>,
    /// External reference.
    pub reference: Option<String>,
}

/// Response for a transaction.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: Uuid,
    /// Account the money moves through.
    pub account_id: Uuid,
    /// Transaction date.
    pub date: NaiveDate,
    /// Description.
    pub description: String,
    /// Stored signed amount.
    pub amount: String,
    /// Direction.
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// Category.
    pub category: String,
    /// Settlement status.
    pub status: String,
    /// External reference.
    pub reference: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

impl From<transactions::Model> for TransactionResponse {
    fn from(model: transactions::Model) -> Self {
        Self {
            id: model.id,
            account_id: model.account_id,
            date: model.date,
            description: model.description,
            amount: model.amount.to_string(),
            transaction_type: ledger::TransactionType::from(model.transaction_type).to_string(),
            category: model.category,
            status: ledger::TransactionStatus::from(model.status).to_string(),
            reference: model.reference,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

/// GET /transactions - List transactions with filters and pagination.
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<TransactionQuery>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());
    let page = query.page_request();

    match repo
        .list_transactions(auth.user_id(), &query.filter(), page)
        .await
    {
        Ok((models, total)) => {
            let data: Vec<TransactionResponse> =
                models.into_iter().map(TransactionResponse::from).collect();
            let response = PageResponse::new(data, page.page, page.limit, total);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list transactions");
            error::respond(&error::transaction_error(&e))
        }
    }
}

/// POST /transactions - Create a transaction and credit its account.
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    let input = CreateTransactionInput {
        user_id: auth.user_id(),
        account_id: payload.account_id,
        date: payload.date.unwrap_or_else(|| Utc::now().date_naive()),
        description: payload.description,
        amount: payload.amount,
        transaction_type: payload.transaction_type,
        category: payload.category,
        status: payload.status,
        reference: payload.reference,
    };

    match repo.create_transaction(input).await {
        Ok(transaction) => {
            info!(transaction_id = %transaction.id, "Transaction created");
            (
                StatusCode::CREATED,
                Json(TransactionResponse::from(transaction)),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create transaction");
            error::respond(&error::transaction_error(&e))
        }
    }
}

/// GET /transactions/{`transaction_id`} - Get one transaction.
async fn get_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(transaction_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo
        .find_transaction_by_id(auth.user_id(), transaction_id)
        .await
    {
        Ok(Some(transaction)) => (
            StatusCode::OK,
            Json(TransactionResponse::from(transaction)),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Transaction not found: {transaction_id}")
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to fetch transaction");
            error::respond(&error::transaction_error(&e))
        }
    }
}

/// PUT /transactions/{`transaction_id`} - Update a transaction.
///
/// Balance adjustments happen inside the repository in the same database
/// transaction as the row update.
async fn update_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(transaction_id): Path<Uuid>,
    Json(payload): Json<UpdateTransactionRequest>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    let input = UpdateTransactionInput {
        account_id: payload.account_id,
        date: payload.date,
        description: payload.description,
        amount: payload.amount,
        transaction_type: payload.transaction_type,
        category: payload.category,
        status: payload.status,
        reference: payload.reference.map(Some),
    };

    match repo
        .update_transaction(auth.user_id(), transaction_id, input)
        .await
    {
        Ok(transaction) => {
            info!(transaction_id = %transaction.id, "Transaction updated");
            (
                StatusCode::OK,
                Json(TransactionResponse::from(transaction)),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to update transaction");
            error::respond(&error::transaction_error(&e))
        }
    }
}

/// DELETE /transactions/{`transaction_id`} - Delete a transaction and revert
/// its balance contribution.
async fn delete_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(transaction_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo
        .delete_transaction(auth.user_id(), transaction_id)
        .await
    {
        Ok(()) => {
            info!(transaction_id = %transaction_id, "Transaction deleted");
            (
                StatusCode::OK,
                Json(json!({ "message": "Transaction deleted" })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to delete transaction");
            error::respond(&error::transaction_error(&e))
        }
    }
}

/// GET /transactions/summary - Totals over a filtered window.
async fn transaction_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<TransactionQuery>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.list_for_period(auth.user_id(), &query.filter()).await {
        Ok(models) => {
            let records: Vec<TransactionRecord> =
                models.iter().map(transaction_record).collect();
            let summary = ReportService::transaction_summary(&records);
            (StatusCode::OK, Json(summary)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to build transaction summary");
            error::respond(&error::transaction_error(&e))
        }
    }
}

pub(crate) fn transaction_record(model: &transactions::Model) -> TransactionRecord {
    TransactionRecord {
        date: model.date,
        amount: model.amount,
        transaction_type: model.transaction_type.into(),
        category: model.category.clone(),
        status: model.status.into(),
    }
}
