//! Aggregate report generation.
//!
//! Pure, stateless folds over record sets the caller has already scoped to
//! one owner and one time window:
//! - Profit & Loss
//! - Balance Sheet
//! - Cash Flow
//! - Trial Balance
//! - Dashboard Summary
//! - Account / Transaction summaries

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::ReportService;
pub use types::*;
