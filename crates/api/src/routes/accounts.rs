//! Account management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, error, middleware::AuthUser};
use finbook_core::ledger;
use finbook_core::reports::{AccountRecord, ReportService};
use finbook_db::entities::accounts;
use finbook_db::repositories::account::{
    AccountRepository, CreateAccountInput, UpdateAccountInput,
};

/// Creates the account routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts", post(create_account))
        .route("/accounts/summary", get(account_summary))
        .route("/accounts/{account_id}", get(get_account))
        .route("/accounts/{account_id}", put(update_account))
        .route("/accounts/{account_id}", delete(delete_account))
}

/// Request body for creating an account.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Account name.
    pub name: String,
    /// Account description.
    pub description: Option<String>,
    /// Account type: asset, liability, equity, revenue, expense.
    #[serde(rename = "type")]
    pub account_type: ledger::AccountType,
    /// Starting balance (default: 0).
    pub opening_balance: Option<Decimal>,
}

/// Request body for updating an account.
///
/// Unknown fields are rejected so a `balance` key cannot slip through;
/// balances move only through transactions.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateAccountRequest {
    /// Account name.
    pub name: Option<String>,
    /// Account description.
    pub description: Option<String>,
    /// Account type.
    #[serde(rename = "type")]
    pub account_type: Option<ledger::AccountType>,
    /// Whether the account is active.
    pub is_active: Option<bool>,
}

/// Response for an account.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: Uuid,
    /// Account name.
    pub name: String,
    /// Account description.
    pub description: Option<String>,
    /// Account type.
    #[serde(rename = "type")]
    pub account_type: String,
    /// Current balance.
    pub balance: String,
    /// Whether the account is active.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

impl From<accounts::Model> for AccountResponse {
    fn from(model: accounts::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            account_type: ledger::AccountType::from(model.account_type).to_string(),
            balance: model.balance.to_string(),
            is_active: model.is_active,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

/// GET /accounts - List the user's active accounts.
async fn list_accounts(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.list_accounts(auth.user_id()).await {
        Ok(accounts) => {
            let response: Vec<AccountResponse> =
                accounts.into_iter().map(AccountResponse::from).collect();
            (StatusCode::OK, Json(json!({ "accounts": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list accounts");
            error::respond(&error::account_error(&e))
        }
    }
}

/// POST /accounts - Create an account.
async fn create_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateAccountRequest>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    let input = CreateAccountInput {
        user_id: auth.user_id(),
        name: payload.name,
        description: payload.description,
        account_type: payload.account_type,
        opening_balance: payload.opening_balance,
    };

    match repo.create_account(input).await {
        Ok(account) => {
            info!(account_id = %account.id, "Account created");
            (StatusCode::CREATED, Json(AccountResponse::from(account))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create account");
            error::respond(&error::account_error(&e))
        }
    }
}

/// GET /accounts/{`account_id`} - Get one account.
async fn get_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(account_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.find_account_by_id(auth.user_id(), account_id).await {
        Ok(Some(account)) => {
            (StatusCode::OK, Json(AccountResponse::from(account))).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Account not found: {account_id}")
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to fetch account");
            error::respond(&error::account_error(&e))
        }
    }
}

/// PUT /accounts/{`account_id`} - Update an account's descriptive fields.
async fn update_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(account_id): Path<Uuid>,
    Json(payload): Json<UpdateAccountRequest>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    let input = UpdateAccountInput {
        name: payload.name,
        description: payload.description.map(Some),
        account_type: payload.account_type,
        is_active: payload.is_active,
    };

    match repo.update_account(auth.user_id(), account_id, input).await {
        Ok(account) => {
            info!(account_id = %account.id, "Account updated");
            (StatusCode::OK, Json(AccountResponse::from(account))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to update account");
            error::respond(&error::account_error(&e))
        }
    }
}

/// DELETE /accounts/{`account_id`} - Soft-delete an account.
async fn delete_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(account_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.soft_delete(auth.user_id(), account_id).await {
        Ok(()) => {
            info!(account_id = %account_id, "Account deactivated");
            (
                StatusCode::OK,
                Json(json!({ "message": "Account deactivated" })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to delete account");
            error::respond(&error::account_error(&e))
        }
    }
}

/// GET /accounts/summary - Totals across the user's active accounts.
async fn account_summary(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.list_active_ordered(auth.user_id()).await {
        Ok(accounts) => {
            let records: Vec<AccountRecord> = accounts.into_iter().map(account_record).collect();
            let summary = ReportService::account_summary(&records);
            (StatusCode::OK, Json(summary)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to build account summary");
            error::respond(&error::account_error(&e))
        }
    }
}

pub(crate) fn account_record(model: accounts::Model) -> AccountRecord {
    AccountRecord {
        name: model.name,
        account_type: model.account_type.into(),
        balance: model.balance,
    }
}
