//! Budget service: cost breakdown and input-boundary validation.

use rust_decimal::Decimal;

use super::error::BudgetError;
use super::types::{BudgetSnapshot, LineItem};

/// Highest accepted margin percentage.
pub const MAX_MARGIN_PCT: Decimal = Decimal::from_parts(200, 0, 0, false, 0);

/// Accepted range for the validity period, in days.
pub const VALIDITY_DAYS: std::ops::RangeInclusive<u32> = 1..=90;

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Computes the cost breakdown for a list of line items.
    ///
    /// Excluded rows are kept in `line_totals` as zero and never reach
    /// `cost_total`. The margin range is not checked here; see
    /// [`BudgetService::validate_margin`].
    ///
    /// Every step saturates at `Decimal::MAX`, so oversized cell input
    /// yields a capped total rather than a panic.
    #[must_use]
    pub fn compute(items: &[LineItem], margin_pct: Decimal) -> BudgetSnapshot {
        let line_totals: Vec<Decimal> = items.iter().map(LineItem::line_total).collect();
        let cost_total = line_totals
            .iter()
            .fold(Decimal::ZERO, |acc, total| acc.saturating_add(*total));
        let margin_amount = cost_total.saturating_mul(margin_pct) / Decimal::ONE_HUNDRED;

        BudgetSnapshot {
            line_totals,
            cost_total,
            margin_pct,
            margin_amount,
            proposed_fee: cost_total.saturating_add(margin_amount),
        }
    }

    /// Validates a margin entered by the user.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::MarginOutOfRange` outside `[0, 200]`.
    pub fn validate_margin(margin_pct: Decimal) -> Result<Decimal, BudgetError> {
        if margin_pct < Decimal::ZERO || margin_pct > MAX_MARGIN_PCT {
            return Err(BudgetError::MarginOutOfRange(margin_pct));
        }
        Ok(margin_pct)
    }

    /// Validates the number of days a quote stays valid.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::ValidityOutOfRange` outside `1..=90`.
    pub fn validate_validity_days(days: u32) -> Result<u32, BudgetError> {
        if !VALIDITY_DAYS.contains(&days) {
            return Err(BudgetError::ValidityOutOfRange(days));
        }
        Ok(days)
    }
}
