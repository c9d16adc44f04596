//! History listing rows for display.

use chrono::TimeZone;
use gigflow_shared::types::{CurrencyFormat, ProposalId};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::store::ProposalStore;

/// One formatted line of the history table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    /// Record id, for load and delete actions.
    pub id: ProposalId,
    /// Creation time, `dd/mm/yyyy HH:MM`.
    pub created_at: String,
    /// Proposal number.
    pub proposal_number: String,
    /// Event name or `-`.
    pub event: String,
    /// Event date, `dd/mm/yyyy`.
    pub event_date: String,
    /// City or `-`.
    pub city: String,
    /// Draft or sent label.
    pub status: &'static str,
    /// Formatted cost total.
    pub cost_total: String,
    /// Margin, e.g. `30%`.
    pub margin: String,
    /// Formatted fee.
    pub proposed_fee: String,
    /// Validity date, `dd/mm/yyyy`.
    pub valid_until: String,
}

/// Builds the history table, most recent first.
///
/// Rows are ordered on the typed creation instant before any formatting.
pub fn history_rows<Tz>(store: &ProposalStore, currency: &CurrencyFormat, tz: &Tz) -> Vec<HistoryRow>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    store
        .list()
        .into_iter()
        .map(|record| {
            let metadata = &record.metadata;
            HistoryRow {
                id: record.id,
                created_at: record
                    .created_at
                    .with_timezone(tz)
                    .format("%d/%m/%Y %H:%M")
                    .to_string(),
                proposal_number: metadata.proposal_number.clone(),
                event: or_dash(&metadata.event_name),
                event_date: metadata.event_date.format("%d/%m/%Y").to_string(),
                city: or_dash(&metadata.city),
                status: metadata.status().label(),
                cost_total: currency.format(record.cost_total),
                margin: format_percent(record.margin_pct),
                proposed_fee: currency.format(record.proposed_fee),
                valid_until: record.valid_until.format("%d/%m/%Y").to_string(),
            }
        })
        .collect()
}

/// Whole-number percentage label.
pub(crate) fn format_percent(pct: Decimal) -> String {
    let whole = pct
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    format!("{whole}%")
}

/// Blank text renders as `-`.
pub(crate) fn or_dash(text: &str) -> String {
    if text.trim().is_empty() {
        "-".to_string()
    } else {
        text.to_string()
    }
}
