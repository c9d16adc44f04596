//! Budget error types.

use gigflow_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Budget-related errors.
///
/// Malformed amounts are not errors: they are coerced to zero. These
/// variants only cover values rejected at the input boundary.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// Margin outside the accepted range.
    #[error("Margin must be between 0% and 200%, got {0}%")]
    MarginOutOfRange(Decimal),

    /// Validity period outside the accepted range.
    #[error("Validity must be between 1 and 90 days, got {0}")]
    ValidityOutOfRange(u32),

    /// No line item at the given row.
    #[error("No line item at row {0}")]
    ItemNotFound(usize),
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        match err {
            BudgetError::ItemNotFound(_) => Self::NotFound(err.to_string()),
            BudgetError::MarginOutOfRange(_) | BudgetError::ValidityOutOfRange(_) => {
                Self::InvalidInput(err.to_string())
            }
        }
    }
}
