//! Core business logic for Finbook.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Account/transaction domain types and balance maintenance
//! - `reports` - Aggregate report generation (P&L, balance sheet, cash flow, ...)
//! - `auth` - Password hashing

pub mod auth;
pub mod ledger;
pub mod reports;
