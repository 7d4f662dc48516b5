//! Database seeder for Finbook development and testing.
//!
//! Seeds a demo user, a small chart of accounts, and sample transactions
//! for local development. Transactions go through the repository so account
//! balances come out consistent.
//!
//! Usage: cargo run --bin seeder

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

use finbook_core::auth::hash_password;
use finbook_core::ledger::{AccountType, TransactionType};
use finbook_db::entities::users;
use finbook_db::repositories::account::{AccountRepository, CreateAccountInput};
use finbook_db::repositories::transaction::{CreateTransactionInput, TransactionRepository};
use finbook_db::repositories::user::UserRepository;

/// Demo user ID (consistent for all seeds).
const DEMO_USER_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Demo login password.
const DEMO_PASSWORD: &str = "demo-password-1";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = finbook_db::connect(&database_url, 5)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo user...");
    let user_id = seed_demo_user(&db).await;

    println!("Seeding accounts...");
    let accounts = seed_accounts(&db, user_id).await;

    println!("Seeding transactions...");
    seed_transactions(&db, user_id, &accounts).await;

    println!("Seeding complete!");
    println!("  login: demo@finbook.dev / {DEMO_PASSWORD}");
}

fn demo_user_id() -> Uuid {
    Uuid::parse_str(DEMO_USER_ID).unwrap()
}

/// Seeds the demo user under its fixed ID, returning that ID.
///
/// The row is inserted directly so the ID stays `DEMO_USER_ID` and the
/// lookup on the next run hits, making re-seeding a no-op.
async fn seed_demo_user(db: &DatabaseConnection) -> Uuid {
    let repo = UserRepository::new(db.clone());
    let existing = repo
        .find_by_id(demo_user_id())
        .await
        .expect("Failed to look up demo user");
    if existing.is_some() {
        println!("  Demo user already exists, skipping...");
        return demo_user_id();
    }

    let now = Utc::now().fixed_offset();
    let user = users::ActiveModel {
        id: Set(demo_user_id()),
        email: Set("demo@finbook.dev".to_string()),
        password_hash: Set(hash_password(DEMO_PASSWORD).expect("Failed to hash demo password")),
        full_name: Set("Demo User".to_string()),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("Failed to create demo user");

    user.id
}

/// Seeds the demo chart of accounts, returning IDs keyed by position:
/// cash, bank, credit card, owner equity.
async fn seed_accounts(db: &DatabaseConnection, user_id: Uuid) -> Vec<Uuid> {
    let repo = AccountRepository::new(db.clone());

    let existing = repo
        .list_accounts(user_id)
        .await
        .expect("Failed to list accounts");
    if !existing.is_empty() {
        println!("  Accounts already exist, skipping...");
        let mut ids: Vec<Uuid> = existing.iter().map(|a| a.id).collect();
        ids.reverse();
        return ids;
    }

    let plan: [(&str, AccountType, Decimal); 4] = [
        ("Petty Cash", AccountType::Asset, dec!(500)),
        ("Business Bank Account", AccountType::Asset, dec!(10000)),
        ("Company Credit Card", AccountType::Liability, dec!(0)),
        ("Owner Equity", AccountType::Equity, dec!(10500)),
    ];

    let mut ids = Vec::with_capacity(plan.len());
    for (name, account_type, opening_balance) in plan {
        let account = repo
            .create_account(CreateAccountInput {
                user_id,
                name: name.to_string(),
                description: None,
                account_type,
                opening_balance: Some(opening_balance),
            })
            .await
            .expect("Failed to create account");
        ids.push(account.id);
    }

    ids
}

/// Seeds sample income and expense transactions for the current month.
async fn seed_transactions(db: &DatabaseConnection, user_id: Uuid, accounts: &[Uuid]) {
    let Some((&cash, rest)) = accounts.split_first() else {
        return;
    };
    let bank = rest.first().copied().unwrap_or(cash);

    let repo = TransactionRepository::new(db.clone());
    let today = Utc::now().date_naive();
    let month_start = today.with_day(1).unwrap_or(today);

    let plan: [(Uuid, &str, Decimal, TransactionType, &str); 5] = [
        (
            bank,
            "Client invoice #1042",
            dec!(2500),
            TransactionType::Income,
            "Sales",
        ),
        (
            bank,
            "Consulting retainer",
            dec!(1200),
            TransactionType::Income,
            "Consulting",
        ),
        (
            bank,
            "Office rent",
            dec!(800),
            TransactionType::Expense,
            "Rent",
        ),
        (
            cash,
            "Team lunch",
            dec!(64.50),
            TransactionType::Expense,
            "Meals",
        ),
        (
            bank,
            "Cloud hosting",
            dec!(120),
            TransactionType::Expense,
            "Software",
        ),
    ];

    for (account_id, description, amount, transaction_type, category) in plan {
        repo.create_transaction(CreateTransactionInput {
            user_id,
            account_id,
            date: month_start,
            description: description.to_string(),
            amount,
            transaction_type,
            category: category.to_string(),
            status: None,
            reference: None,
        })
        .await
        .expect("Failed to create transaction");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_user_id_is_fixed() {
        assert_eq!(demo_user_id().to_string(), DEMO_USER_ID);
    }
}
