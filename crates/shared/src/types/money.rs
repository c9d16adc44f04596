//! Currency formatting for presentation.
//!
//! Amounts are `rust_decimal::Decimal` end to end. Formatting rounds to two
//! fractional digits and produces a display string only; the result must
//! never be parsed back into a computation.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Localized currency presentation.
///
/// The default is Brazilian Real: `R$ 1.234,56`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    /// Symbol placed before the amount.
    pub symbol: String,
    /// Separator between groups of three integer digits.
    pub thousands_separator: String,
    /// Separator between integer and fractional digits.
    pub decimal_separator: String,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::brl()
    }
}

impl CurrencyFormat {
    /// Brazilian Real.
    #[must_use]
    pub fn brl() -> Self {
        Self {
            symbol: "R$".to_string(),
            thousands_separator: ".".to_string(),
            decimal_separator: ",".to_string(),
        }
    }

    /// Formats an amount rounded half away from zero to two places.
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };

        let plain = format!("{:.2}", rounded.abs());
        let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, digit) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push_str(&self.thousands_separator);
            }
            grouped.push(digit);
        }

        format!(
            "{} {sign}{grouped}{}{frac_part}",
            self.symbol, self.decimal_separator
        )
    }
}

#[cfg(test)]
#[path = "money_tests.rs"]
mod tests;
