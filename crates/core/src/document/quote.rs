//! Cost-estimate document.

use chrono::NaiveDate;
use gigflow_shared::types::CurrencyFormat;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::budget::{BudgetSnapshot, LineItem};
use crate::proposal::ProposalMetadata;
use crate::proposal::history::{format_percent, or_dash};

/// One included row of the estimate table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteRow {
    /// Row label.
    pub label: String,
    /// Row description.
    pub description: String,
    /// Quantity with no decimals.
    pub quantity: String,
    /// Formatted unit cost.
    pub unit_cost: String,
    /// Formatted line total.
    pub total: String,
}

/// Cost estimate sent to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteDocument {
    /// Proposal number.
    pub proposal_number: String,
    /// `ENVIADO` or `RASCUNHO`.
    pub status: String,
    /// Event name or `-`.
    pub event: String,
    /// Event date, `dd/mm/yyyy`.
    pub event_date: String,
    /// City or `-`.
    pub city: String,
    /// Validity, e.g. `7 dia(s) (até 23/10/2026)`.
    pub validity: String,
    /// Included rows only.
    pub rows: Vec<QuoteRow>,
    /// Formatted cost total.
    pub cost_total: String,
    /// Margin row label with percentage.
    pub margin_label: String,
    /// Formatted margin amount.
    pub margin_amount: String,
    /// Formatted fee.
    pub proposed_fee: String,
    /// Payment terms or `-`.
    pub payment_terms: String,
    /// Notes, when present.
    pub notes: Option<String>,
}

impl QuoteDocument {
    /// Builds the estimate from the metadata, the rows and their snapshot.
    ///
    /// `snapshot` must come from `items`; row totals are read from it.
    #[must_use]
    pub fn build(
        metadata: &ProposalMetadata,
        items: &[LineItem],
        snapshot: &BudgetSnapshot,
        issued_on: NaiveDate,
        currency: &CurrencyFormat,
    ) -> Self {
        let rows = items
            .iter()
            .zip(&snapshot.line_totals)
            .filter(|(item, _)| item.include)
            .map(|(item, total)| QuoteRow {
                label: item.label.clone(),
                description: item.description.clone(),
                quantity: format_quantity(item.quantity()),
                unit_cost: currency.format(item.unit_cost()),
                total: currency.format(*total),
            })
            .collect();

        let notes = metadata.notes.trim();

        Self {
            proposal_number: metadata.proposal_number.clone(),
            status: metadata.status().label().to_uppercase(),
            event: or_dash(&metadata.event_name),
            event_date: metadata.event_date.format("%d/%m/%Y").to_string(),
            city: or_dash(&metadata.city),
            validity: format!(
                "{} dia(s) (até {})",
                metadata.validity_days,
                metadata.valid_until(issued_on).format("%d/%m/%Y")
            ),
            rows,
            cost_total: currency.format(snapshot.cost_total),
            margin_label: format!("Margem de Lucro ({})", format_percent(snapshot.margin_pct)),
            margin_amount: currency.format(snapshot.margin_amount),
            proposed_fee: currency.format(snapshot.proposed_fee),
            payment_terms: or_dash(&metadata.payment_terms),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        }
    }
}

fn format_quantity(quantity: Decimal) -> String {
    quantity
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}
