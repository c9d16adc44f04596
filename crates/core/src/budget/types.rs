//! Budget data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::coerce::{clamp_amount, coerce_amount, lenient_amount, lenient_flag};

/// One row of the cost breakdown table.
///
/// `quantity` and `unit_cost` are never negative: every setter and the
/// deserializer clamp or coerce into the non-negative range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Short row label.
    #[serde(default, alias = "Item")]
    pub label: String,
    /// Free-text description.
    #[serde(default, alias = "Descrição")]
    pub description: String,
    #[serde(default, alias = "Quantidade", deserialize_with = "lenient_amount")]
    quantity: Decimal,
    #[serde(default, alias = "Custo Unitário (R$)", deserialize_with = "lenient_amount")]
    unit_cost: Decimal,
    /// Whether the row counts toward the total.
    #[serde(default, alias = "Incluir", deserialize_with = "lenient_flag")]
    pub include: bool,
}

impl LineItem {
    /// Creates an included line item, clamping negative amounts to zero.
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        description: impl Into<String>,
        quantity: Decimal,
        unit_cost: Decimal,
    ) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
            quantity: clamp_amount(quantity),
            unit_cost: clamp_amount(unit_cost),
            include: true,
        }
    }

    /// Creates an empty included row with the given label.
    #[must_use]
    pub fn blank(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(label, description, Decimal::ZERO, Decimal::ZERO)
    }

    /// Returns the item with the include flag set.
    #[must_use]
    pub fn included(mut self, include: bool) -> Self {
        self.include = include;
        self
    }

    /// Quantity.
    #[must_use]
    pub const fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Cost per unit.
    #[must_use]
    pub const fn unit_cost(&self) -> Decimal {
        self.unit_cost
    }

    /// Sets the quantity, clamping negatives to zero.
    pub fn set_quantity(&mut self, quantity: Decimal) {
        self.quantity = clamp_amount(quantity);
    }

    /// Sets the unit cost, clamping negatives to zero.
    pub fn set_unit_cost(&mut self, unit_cost: Decimal) {
        self.unit_cost = clamp_amount(unit_cost);
    }

    /// Sets the quantity from raw cell text.
    pub fn set_quantity_text(&mut self, raw: &str) {
        self.quantity = coerce_amount(raw);
    }

    /// Sets the unit cost from raw cell text.
    pub fn set_unit_cost_text(&mut self, raw: &str) {
        self.unit_cost = coerce_amount(raw);
    }

    /// `quantity * unit_cost`, or zero when the row is excluded.
    ///
    /// Saturates at `Decimal::MAX` instead of overflowing.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        if self.include {
            self.quantity.saturating_mul(self.unit_cost)
        } else {
            Decimal::ZERO
        }
    }
}

/// Cost breakdown computed from the current line items and margin.
///
/// Values keep full precision; rounding happens only when formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSnapshot {
    /// Per-row totals, zero for excluded rows, in row order.
    pub line_totals: Vec<Decimal>,
    /// Sum of the included row totals.
    pub cost_total: Decimal,
    /// Margin percentage applied.
    pub margin_pct: Decimal,
    /// `cost_total * margin_pct / 100`.
    pub margin_amount: Decimal,
    /// `cost_total + margin_amount`.
    pub proposed_fee: Decimal,
}
