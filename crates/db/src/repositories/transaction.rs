//! Transaction repository with balance maintenance.
//!
//! Every mutation runs inside a database transaction and moves account
//! balances through single-statement atomic increments
//! (`balance = balance + delta`), so concurrent mutations against the same
//! account serialize at the row and cannot lose an update. The deltas
//! themselves come from `finbook_core::ledger`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use finbook_core::ledger::{
    self, BalanceDelta, ValidationError, creation_delta, deletion_delta, normalize_amount,
    update_deltas, validate_category, validate_description, validate_transaction_fields,
};
use finbook_shared::PageRequest;

use crate::entities::{
    accounts,
    sea_orm_active_enums::{TransactionStatus, TransactionType},
    transactions,
};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found for this user.
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    /// Referenced account not found for this user.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Input failed domain validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Owning user.
    pub user_id: Uuid,
    /// Account the money moves through.
    pub account_id: Uuid,
    /// Transaction date.
    pub date: NaiveDate,
    /// Description.
    pub description: String,
    /// Amount as entered; the sign is normalized by `transaction_type`.
    pub amount: Decimal,
    /// Income or expense.
    pub transaction_type: ledger::TransactionType,
    /// Free-text category.
    pub category: String,
    /// Settlement status; defaults to completed.
    pub status: Option<ledger::TransactionStatus>,
    /// Optional external reference.
    pub reference: Option<String>,
}

/// Input for updating a transaction.
///
/// When the amount, type, or account changes, the stored amount is
/// re-normalized and the affected balances are adjusted in the same database
/// transaction.
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    /// Move the transaction to a different account.
    pub account_id: Option<Uuid>,
    /// Transaction date.
    pub date: Option<NaiveDate>,
    /// Description.
    pub description: Option<String>,
    /// New amount as entered (sign ignored).
    pub amount: Option<Decimal>,
    /// New direction.
    pub transaction_type: Option<ledger::TransactionType>,
    /// Category.
    pub category: Option<String>,
    /// Settlement status.
    pub status: Option<ledger::TransactionStatus>,
    /// External reference (`Some(None)` clears it).
    pub reference: Option<Option<String>>,
}

/// Filter options for listing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by direction.
    pub transaction_type: Option<ledger::TransactionType>,
    /// Case-insensitive substring match on category.
    pub category: Option<String>,
    /// Inclusive start date.
    pub from: Option<NaiveDate>,
    /// Inclusive end date.
    pub to: Option<NaiveDate>,
}

/// Transaction repository with balance maintenance.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a transaction and credits its account.
    ///
    /// The stored amount is sign-normalized (positive income, negative
    /// expense) and added to the account balance atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not belong to the user, the
    /// description or category is blank, or the database writes fail.
    pub async fn create_transaction(
        &self,
        input: CreateTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        validate_transaction_fields(&input.description, &input.category)?;

        let txn = self.db.begin().await?;

        verify_account_owned(&txn, input.user_id, input.account_id).await?;

        let stored_amount = normalize_amount(input.transaction_type, input.amount);
        let status = input
            .status
            .unwrap_or(ledger::TransactionStatus::Completed);

        let now = chrono::Utc::now().into();
        let transaction = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            account_id: Set(input.account_id),
            date: Set(input.date),
            description: Set(input.description),
            amount: Set(stored_amount),
            transaction_type: Set(input.transaction_type.into()),
            category: Set(input.category),
            status: Set(status.into()),
            reference: Set(input.reference),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let transaction = transaction.insert(&txn).await?;
        apply_delta(&txn, creation_delta(transaction.account_id, stored_amount)).await?;

        txn.commit().await?;
        Ok(transaction)
    }

    /// Updates a transaction, re-normalizing and moving balances as needed.
    ///
    /// The old amount is reverted from the old account and the new amount is
    /// applied to the (possibly different) target account. The target account
    /// is verified before any balance moves.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or target account does not belong
    /// to the user, validation fails, or the database writes fail.
    pub async fn update_transaction(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: UpdateTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        if let Some(description) = &input.description {
            validate_description(description)?;
        }
        if let Some(category) = &input.category {
            validate_category(category)?;
        }

        let txn = self.db.begin().await?;

        let existing = transactions::Entity::find_by_id(id)
            .filter(transactions::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
            .ok_or(TransactionError::NotFound(id))?;

        let target_account_id = input.account_id.unwrap_or(existing.account_id);
        if target_account_id != existing.account_id {
            verify_account_owned(&txn, user_id, target_account_id).await?;
        }

        // Re-derive the stored amount from the effective type and the
        // effective magnitude. The old stored amount carries the old sign,
        // so only its absolute value survives a type flip.
        let effective_type = input
            .transaction_type
            .unwrap_or_else(|| existing.transaction_type.into());
        let effective_magnitude = input.amount.unwrap_or_else(|| existing.amount.abs());
        let new_amount = normalize_amount(effective_type, effective_magnitude);

        for delta in update_deltas(
            existing.account_id,
            existing.amount,
            target_account_id,
            new_amount,
        ) {
            apply_delta(&txn, delta).await?;
        }

        let mut active: transactions::ActiveModel = existing.into();
        active.account_id = Set(target_account_id);
        active.amount = Set(new_amount);
        active.transaction_type = Set(TransactionType::from(effective_type));
        if let Some(date) = input.date {
            active.date = Set(date);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(category) = input.category {
            active.category = Set(category);
        }
        if let Some(status) = input.status {
            active.status = Set(TransactionStatus::from(status));
        }
        if let Some(reference) = input.reference {
            active.reference = Set(reference);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&txn).await?;
        txn.commit().await?;
        Ok(updated)
    }

    /// Deletes a transaction and reverts its balance contribution.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction does not belong to the user or
    /// the database writes fail.
    pub async fn delete_transaction(&self, user_id: Uuid, id: Uuid) -> Result<(), TransactionError> {
        let txn = self.db.begin().await?;

        let existing = transactions::Entity::find_by_id(id)
            .filter(transactions::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
            .ok_or(TransactionError::NotFound(id))?;

        apply_delta(&txn, deletion_delta(existing.account_id, existing.amount)).await?;
        transactions::Entity::delete_by_id(existing.id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    /// Finds a transaction by ID, scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_transaction_by_id(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<transactions::Model>, TransactionError> {
        let transaction = transactions::Entity::find_by_id(id)
            .filter(transactions::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        Ok(transaction)
    }

    /// Lists a user's transactions with filters and pagination.
    ///
    /// Returns the page of models (date descending, newest created first
    /// within a date) and the total match count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_transactions(
        &self,
        user_id: Uuid,
        filter: &TransactionFilter,
        page: PageRequest,
    ) -> Result<(Vec<transactions::Model>, u64), TransactionError> {
        let page = page.clamped();
        let query = filtered_query(user_id, filter)
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::CreatedAt);

        let paginator = query.paginate(&self.db, page.limit);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page - 1).await?;

        Ok((models, total))
    }

    /// Lists all of a user's transactions matching a filter, date ascending.
    ///
    /// Report folds consume this unpaginated form.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_period(
        &self,
        user_id: Uuid,
        filter: &TransactionFilter,
    ) -> Result<Vec<transactions::Model>, TransactionError> {
        let models = filtered_query(user_id, filter)
            .order_by_asc(transactions::Column::Date)
            .order_by_asc(transactions::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models)
    }

    /// Returns the most recently created transactions with their accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn recent_transactions(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<(transactions::Model, Option<accounts::Model>)>, TransactionError> {
        let rows = transactions::Entity::find()
            .find_also_related(accounts::Entity)
            .filter(transactions::Column::UserId.eq(user_id))
            .order_by_desc(transactions::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(rows)
    }
}

fn filtered_query(
    user_id: Uuid,
    filter: &TransactionFilter,
) -> sea_orm::Select<transactions::Entity> {
    use sea_orm::sea_query::extension::postgres::PgExpr;

    let mut query =
        transactions::Entity::find().filter(transactions::Column::UserId.eq(user_id));

    if let Some(transaction_type) = filter.transaction_type {
        query = query.filter(
            transactions::Column::TransactionType.eq(TransactionType::from(transaction_type)),
        );
    }
    if let Some(category) = &filter.category {
        query = query.filter(
            Expr::col(transactions::Column::Category).ilike(format!("%{category}%")),
        );
    }
    if let Some(from) = filter.from {
        query = query.filter(transactions::Column::Date.gte(from));
    }
    if let Some(to) = filter.to {
        query = query.filter(transactions::Column::Date.lte(to));
    }

    query
}

/// Verifies that an active account exists and belongs to the user.
async fn verify_account_owned<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    account_id: Uuid,
) -> Result<(), TransactionError> {
    let account = accounts::Entity::find_by_id(account_id)
        .filter(accounts::Column::UserId.eq(user_id))
        .filter(accounts::Column::IsActive.eq(true))
        .one(conn)
        .await?;

    if account.is_none() {
        return Err(TransactionError::AccountNotFound(account_id));
    }
    Ok(())
}

/// Applies one balance delta as a single atomic increment.
async fn apply_delta<C: ConnectionTrait>(
    conn: &C,
    delta: BalanceDelta,
) -> Result<(), TransactionError> {
    use sea_orm::ExprTrait;

    if delta.amount == Decimal::ZERO {
        return Ok(());
    }

    accounts::Entity::update_many()
        .col_expr(
            accounts::Column::Balance,
            Expr::col(accounts::Column::Balance).add(delta.amount),
        )
        .col_expr(
            accounts::Column::UpdatedAt,
            Expr::value(chrono::Utc::now()),
        )
        .filter(accounts::Column::Id.eq(delta.account_id))
        .exec(conn)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::*;

    #[test]
    fn test_error_display() {
        let id = Uuid::new_v4();
        let err = TransactionError::NotFound(id);
        assert!(err.to_string().contains("Transaction not found"));

        let err = TransactionError::AccountNotFound(id);
        assert!(err.to_string().contains("Account not found"));
    }

    fn sample_transaction(user_id: Uuid, account_id: Uuid) -> transactions::Model {
        let now = chrono::Utc::now().fixed_offset();
        transactions::Model {
            id: Uuid::new_v4(),
            user_id,
            account_id,
            date: NaiveDate::from_ymd_opt(2026, 5, 20).unwrap(),
            description: "Client invoice".to_string(),
            amount: Decimal::new(20000, 2),
            transaction_type: TransactionType::Income,
            category: "Sales".to_string(),
            status: TransactionStatus::Completed,
            reference: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_unowned_account() {
        // The account lookup scoped to the requesting user comes back empty,
        // as it does for another user's account or a nonexistent one.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<accounts::Model>::new()])
            .into_connection();
        let repo = TransactionRepository::new(db.clone());

        let account_id = Uuid::new_v4();
        let err = repo
            .create_transaction(CreateTransactionInput {
                user_id: Uuid::new_v4(),
                account_id,
                date: NaiveDate::from_ymd_opt(2026, 5, 20).unwrap(),
                description: "Team lunch".to_string(),
                amount: Decimal::new(6450, 2),
                transaction_type: ledger::TransactionType::Expense,
                category: "Meals".to_string(),
                status: None,
                reference: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, TransactionError::AccountNotFound(id) if id == account_id));

        // Nothing was inserted and no balance moved.
        let log = format!("{:?}", db.into_transaction_log());
        assert!(!log.contains("INSERT"));
        assert!(!log.contains("UPDATE"));
    }

    #[tokio::test]
    async fn test_update_rejects_unowned_target_before_mutation() {
        let user_id = Uuid::new_v4();
        let existing = sample_transaction(user_id, Uuid::new_v4());
        let id = existing.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing]])
            .append_query_results([Vec::<accounts::Model>::new()])
            .into_connection();
        let repo = TransactionRepository::new(db.clone());

        let target = Uuid::new_v4();
        let err = repo
            .update_transaction(
                user_id,
                id,
                UpdateTransactionInput {
                    account_id: Some(target),
                    ..UpdateTransactionInput::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, TransactionError::AccountNotFound(id) if id == target));

        // Neither account balance nor the row was touched.
        let log = format!("{:?}", db.into_transaction_log());
        assert!(!log.contains("UPDATE"));
    }

    #[tokio::test]
    async fn test_find_is_owner_scoped() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<transactions::Model>::new()])
            .into_connection();
        let repo = TransactionRepository::new(db.clone());

        let found = repo
            .find_transaction_by_id(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap();
        assert!(found.is_none());

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("user_id"));
    }
}
