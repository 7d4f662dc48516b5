//! Maps repository errors onto the shared error taxonomy and JSON responses.

use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde_json::json;

use finbook_db::repositories::account::AccountError;
use finbook_db::repositories::transaction::TransactionError;
use finbook_db::repositories::user::UserError;
use finbook_shared::AppError;

/// Renders an [`AppError`] as a JSON error response.
#[must_use]
pub fn respond(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}

/// Converts an account repository error.
#[must_use]
pub fn account_error(err: &AccountError) -> AppError {
    match err {
        AccountError::NotFound(id) => AppError::NotFound(format!("account {id}")),
        AccountError::Validation(e) => AppError::Validation(e.to_string()),
        AccountError::Database(e) => AppError::Database(e.to_string()),
    }
}

/// Converts a transaction repository error.
#[must_use]
pub fn transaction_error(err: &TransactionError) -> AppError {
    match err {
        TransactionError::NotFound(id) => AppError::NotFound(format!("transaction {id}")),
        TransactionError::AccountNotFound(id) => AppError::NotFound(format!("account {id}")),
        TransactionError::Validation(e) => AppError::Validation(e.to_string()),
        TransactionError::Database(e) => AppError::Database(e.to_string()),
    }
}

/// Converts a user repository error.
#[must_use]
pub fn user_error(err: &UserError) -> AppError {
    match err {
        UserError::DuplicateEmail(email) => {
            AppError::Conflict(format!("email '{email}' is already registered"))
        }
        UserError::NotFound(id) => AppError::NotFound(format!("user {id}")),
        UserError::Database(e) => AppError::Database(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_not_found_maps_to_404() {
        let err = account_error(&AccountError::NotFound(uuid::Uuid::new_v4()));
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_duplicate_email_maps_to_conflict() {
        let err = user_error(&UserError::DuplicateEmail("a@b.c".into()));
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "CONFLICT");
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err = transaction_error(&TransactionError::Validation(
            finbook_core::ledger::ValidationError::EmptyDescription,
        ));
        assert_eq!(err.status_code(), 400);
    }
}
