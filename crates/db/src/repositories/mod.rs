//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod account;
pub mod transaction;
pub mod user;

pub use account::{AccountError, AccountRepository, CreateAccountInput, UpdateAccountInput};
pub use transaction::{
    CreateTransactionInput, TransactionError, TransactionFilter, TransactionRepository,
    UpdateTransactionInput,
};
pub use user::{CreateUserInput, UserError, UserRepository};
