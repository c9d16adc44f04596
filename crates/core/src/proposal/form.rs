//! Editable proposal state and the typed record-to-form mapping.

use chrono::NaiveDateTime;
use gigflow_shared::AppConfig;
use gigflow_shared::config::ProposalDefaults;
use rust_decimal::Decimal;

use super::types::{ProposalMetadata, ProposalRecord};
use crate::budget::{BudgetError, BudgetService, BudgetSnapshot, LineItem, default_line_items};

/// Everything the user edits: metadata, margin and line items.
///
/// Amount and range checks happen in the setters; the budget is always
/// derived through [`ProposalForm::snapshot`], never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalForm {
    /// Event and contract metadata.
    pub metadata: ProposalMetadata,
    margin_pct: Decimal,
    items: Vec<LineItem>,
}

impl ProposalForm {
    /// A blank form: configured defaults and the default line items.
    #[must_use]
    pub fn from_config(config: &AppConfig, now: NaiveDateTime) -> Self {
        Self {
            metadata: ProposalMetadata::from_config(config, now),
            margin_pct: config.proposal.margin_pct,
            items: default_line_items(),
        }
    }

    /// Restores a saved record into a fully populated form.
    ///
    /// Groups and fields absent from the stored document already hold
    /// their defaults after deserialization. Values the setters would
    /// reject, as found in hand-edited files, fall back to the defaults too.
    #[must_use]
    pub fn from_record(record: &ProposalRecord) -> Self {
        let defaults = ProposalDefaults::default();
        let mut metadata = record.metadata.clone();
        metadata.validity_days = BudgetService::validate_validity_days(metadata.validity_days)
            .unwrap_or(defaults.validity_days);

        Self {
            metadata,
            margin_pct: BudgetService::validate_margin(record.margin_pct)
                .unwrap_or(defaults.margin_pct),
            items: record.items.clone(),
        }
    }

    /// Current margin percentage.
    #[must_use]
    pub const fn margin_pct(&self) -> Decimal {
        self.margin_pct
    }

    /// Sets the margin.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::MarginOutOfRange` outside `[0, 200]`; the
    /// previous margin is kept.
    pub fn set_margin(&mut self, margin_pct: Decimal) -> Result<(), BudgetError> {
        self.margin_pct = BudgetService::validate_margin(margin_pct)?;
        Ok(())
    }

    /// Sets how many days the quote stays valid.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::ValidityOutOfRange` outside `1..=90`.
    pub fn set_validity_days(&mut self, days: u32) -> Result<(), BudgetError> {
        self.metadata.validity_days = BudgetService::validate_validity_days(days)?;
        Ok(())
    }

    /// Line items in row order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Appends a row.
    pub fn add_item(&mut self, item: LineItem) {
        self.items.push(item);
    }

    /// Removes the row at `index`.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::ItemNotFound` if there is no such row.
    pub fn remove_item(&mut self, index: usize) -> Result<LineItem, BudgetError> {
        if index >= self.items.len() {
            return Err(BudgetError::ItemNotFound(index));
        }
        Ok(self.items.remove(index))
    }

    /// Mutable access to the row at `index`.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::ItemNotFound` if there is no such row.
    pub fn item_mut(&mut self, index: usize) -> Result<&mut LineItem, BudgetError> {
        self.items
            .get_mut(index)
            .ok_or(BudgetError::ItemNotFound(index))
    }

    /// Replaces all rows.
    pub fn replace_items(&mut self, items: Vec<LineItem>) {
        self.items = items;
    }

    /// Recomputes the budget from the current rows and margin.
    #[must_use]
    pub fn snapshot(&self) -> BudgetSnapshot {
        BudgetService::compute(&self.items, self.margin_pct)
    }
}
