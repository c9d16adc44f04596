//! Lenient amount parsing.
//!
//! The editor must never fail on interim input such as a cleared cell, so
//! anything that does not read as a non-negative number becomes zero.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Clamps negative amounts to zero.
#[must_use]
pub fn clamp_amount(amount: Decimal) -> Decimal {
    amount.max(Decimal::ZERO)
}

/// Parses a raw cell value into a non-negative amount.
///
/// Accepts plain (`1234.5`) and Brazilian (`1.234,56`, `R$ 10`) notation.
/// Blank, non-numeric and negative input yields zero.
#[must_use]
pub fn coerce_amount(raw: &str) -> Decimal {
    let trimmed = raw
        .trim()
        .trim_start_matches(|c: char| c.is_alphabetic() || c == '$' || c.is_whitespace());
    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();

    if compact.is_empty() {
        return Decimal::ZERO;
    }

    let normalized = normalize_separators(&compact);
    Decimal::from_str(&normalized).map_or(Decimal::ZERO, clamp_amount)
}

fn normalize_separators(s: &str) -> String {
    let last_comma = s.rfind(',');
    let last_dot = s.rfind('.');

    match (last_comma, last_dot) {
        // Both present: whichever comes last is the decimal separator.
        (Some(comma), Some(dot)) if comma > dot => s.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => s.replace(',', ""),
        (Some(_), None) if s.matches(',').count() > 1 => s.replace(',', ""),
        (Some(_), None) => s.replace(',', "."),
        (None, Some(_)) if s.matches('.').count() > 1 => s.replace('.', ""),
        _ => s.to_string(),
    }
}

/// Deserializes an amount from a number, a numeric string, or `null`.
pub(crate) fn lenient_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => number_amount(&n),
        Value::String(s) => coerce_amount(&s),
        _ => Decimal::ZERO,
    })
}

/// Large JSON numbers print in exponent form (`1e21`), which the decimal
/// parser rejects; those go through `f64` instead.
fn number_amount(n: &serde_json::Number) -> Decimal {
    Decimal::from_str(&n.to_string())
        .ok()
        .or_else(|| n.as_f64().and_then(|f| Decimal::try_from(f).ok()))
        .map_or(Decimal::ZERO, clamp_amount)
}

/// Deserializes the include flag; anything that is not clearly true is false.
pub(crate) fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_i64().is_some_and(|v| v != 0),
        _ => false,
    })
}
