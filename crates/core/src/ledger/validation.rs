//! Field validation for account and transaction inputs.

use thiserror::Error;

/// Validation errors for ledger inputs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Account name is missing or blank.
    #[error("account name must not be empty")]
    EmptyAccountName,

    /// Transaction description is missing or blank.
    #[error("transaction description must not be empty")]
    EmptyDescription,

    /// Transaction category is missing or blank.
    #[error("transaction category must not be empty")]
    EmptyCategory,
}

/// Validates an account display name.
///
/// # Errors
///
/// Returns `ValidationError::EmptyAccountName` if the name is blank.
pub fn validate_account_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyAccountName);
    }
    Ok(())
}

/// Validates a transaction description.
///
/// # Errors
///
/// Returns `ValidationError::EmptyDescription` if the description is blank.
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.trim().is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    Ok(())
}

/// Validates a transaction category.
///
/// # Errors
///
/// Returns `ValidationError::EmptyCategory` if the category is blank.
pub fn validate_category(category: &str) -> Result<(), ValidationError> {
    if category.trim().is_empty() {
        return Err(ValidationError::EmptyCategory);
    }
    Ok(())
}

/// Validates the required free-text fields of a transaction.
///
/// # Errors
///
/// Returns an error if the description or category is blank.
pub fn validate_transaction_fields(description: &str, category: &str) -> Result<(), ValidationError> {
    validate_description(description)?;
    validate_category(category)
}
