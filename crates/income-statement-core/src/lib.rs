//! Income statement (profit and loss) model.
//!
//! An [`IncomeStatement`] holds the raw line items of one reporting period and
//! derives gross, operating, total and net profit from them on every call.
//! Itemised breakdowns (tax categories, selling, administrative and
//! non-operating expense categories) sit beside their aggregates and never
//! feed the arithmetic; [`IncomeStatement::reconcile`] compares the two.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

pub mod error;
pub mod statement;
pub mod types;

#[cfg(feature = "render")]
pub mod render;

pub use error::IncomeStatementError;
pub use statement::model::{IncomeStatement, LineItem};
pub use types::*;

/// Standard result type for all income statement operations
pub type IncomeStatementResult<T> = Result<T, IncomeStatementError>;
