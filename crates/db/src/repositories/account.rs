//! Account repository for the chart of accounts.
//!
//! Balances are maintained exclusively by the transaction repository; the
//! only balance this repository ever writes is the opening balance at
//! creation time. Deletes are soft: `is_active` flips to false and the
//! account drops out of listings and reports.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use finbook_core::ledger::{self, ValidationError, validate_account_name};

use crate::entities::{accounts, sea_orm_active_enums::AccountType};

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account not found for this user.
    #[error("Account not found: {0}")]
    NotFound(Uuid),

    /// Input failed domain validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Owning user.
    pub user_id: Uuid,
    /// Account name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Account classification.
    pub account_type: ledger::AccountType,
    /// Starting balance; defaults to zero.
    pub opening_balance: Option<Decimal>,
}

/// Input for updating an account.
///
/// There is deliberately no balance field: balances move only through
/// transactions.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountInput {
    /// Account name.
    pub name: Option<String>,
    /// Description (`Some(None)` clears it).
    pub description: Option<Option<String>>,
    /// Account classification.
    pub account_type: Option<ledger::AccountType>,
    /// Active flag.
    pub is_active: Option<bool>,
}

/// Account repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new account for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the insert fails.
    pub async fn create_account(
        &self,
        input: CreateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        validate_account_name(&input.name)?;

        let now = chrono::Utc::now().into();
        let account = accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            name: Set(input.name),
            description: Set(input.description),
            account_type: Set(input.account_type.into()),
            balance: Set(input.opening_balance.unwrap_or(Decimal::ZERO)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let account = account.insert(&self.db).await?;
        Ok(account)
    }

    /// Lists a user's active accounts, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_accounts(&self, user_id: Uuid) -> Result<Vec<accounts::Model>, AccountError> {
        let accounts = accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(user_id))
            .filter(accounts::Column::IsActive.eq(true))
            .order_by_desc(accounts::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(accounts)
    }

    /// Lists a user's active accounts ordered by type, then name.
    ///
    /// Report folds that preserve input order rely on this ordering.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_active_ordered(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<accounts::Model>, AccountError> {
        let accounts = accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(user_id))
            .filter(accounts::Column::IsActive.eq(true))
            .order_by_asc(accounts::Column::AccountType)
            .order_by_asc(accounts::Column::Name)
            .all(&self.db)
            .await?;

        Ok(accounts)
    }

    /// Finds an account by ID, scoped to its owner.
    ///
    /// Inactive accounts still resolve so their history stays reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_account_by_id(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<accounts::Model>, AccountError> {
        let account = accounts::Entity::find_by_id(id)
            .filter(accounts::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        Ok(account)
    }

    /// Updates an account's descriptive fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist for this user, the new
    /// name is blank, or the update fails.
    pub async fn update_account(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: UpdateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        let account = self
            .find_account_by_id(user_id, id)
            .await?
            .ok_or(AccountError::NotFound(id))?;

        let mut active: accounts::ActiveModel = account.into();

        if let Some(name) = input.name {
            validate_account_name(&name)?;
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(account_type) = input.account_type {
            active.account_type = Set(AccountType::from(account_type));
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        let account = active.update(&self.db).await?;
        Ok(account)
    }

    /// Soft-deletes an account.
    ///
    /// Existing transactions keep their reference; the account simply stops
    /// appearing in listings and reports.
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist for this user or the
    /// update fails.
    pub async fn soft_delete(&self, user_id: Uuid, id: Uuid) -> Result<(), AccountError> {
        let account = self
            .find_account_by_id(user_id, id)
            .await?
            .ok_or(AccountError::NotFound(id))?;

        let mut active: accounts::ActiveModel = account.into();
        active.is_active = Set(false);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&self.db).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use finbook_core::ledger::ValidationError;

    use super::*;

    #[test]
    fn test_error_display() {
        let id = Uuid::new_v4();
        let err = AccountError::NotFound(id);
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains(&id.to_string()));

        let err = AccountError::Validation(ValidationError::EmptyAccountName);
        assert!(err.to_string().contains("name"));
    }
}
