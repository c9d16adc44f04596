//! Editing session: the form being edited plus the proposal history.
//!
//! The host layer owns a `Session` for the lifetime of one user session
//! and passes it by reference to every action. There is one writer and no
//! shared state between sessions.

use chrono::{Local, NaiveDate};
use gigflow_shared::AppConfig;
use gigflow_shared::types::{ProposalId, SessionId};

use crate::budget::BudgetSnapshot;
use crate::document::{ContractDocument, QuoteDocument};
use crate::proposal::{HistoryRow, ProposalError, ProposalForm, ProposalRecord, ProposalStore, history_rows};

/// State of one editing session.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    config: AppConfig,
    form: ProposalForm,
    store: ProposalStore,
}

impl Session {
    /// Starts a session with a blank form and an empty history.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self::with_store(config, ProposalStore::new())
    }

    /// Starts a session over an existing history.
    #[must_use]
    pub fn with_store(config: AppConfig, store: ProposalStore) -> Self {
        let form = ProposalForm::from_config(&config, Local::now().naive_local());
        let id = SessionId::new();
        tracing::debug!(session_id = %id, records = store.len(), "Session started");
        Self {
            id,
            config,
            form,
            store,
        }
    }

    /// Session id.
    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Configuration the session was started with.
    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The form being edited.
    #[must_use]
    pub const fn form(&self) -> &ProposalForm {
        &self.form
    }

    /// Mutable access to the form being edited.
    pub fn form_mut(&mut self) -> &mut ProposalForm {
        &mut self.form
    }

    /// Saved proposals.
    #[must_use]
    pub const fn store(&self) -> &ProposalStore {
        &self.store
    }

    /// Mutable access to the history, for delete and import.
    pub fn store_mut(&mut self) -> &mut ProposalStore {
        &mut self.store
    }

    /// Budget for the current form.
    #[must_use]
    pub fn snapshot(&self) -> BudgetSnapshot {
        self.form.snapshot()
    }

    /// Saves the current form into the history.
    pub fn save_current(&mut self) -> ProposalRecord {
        let snapshot = self.form.snapshot();
        self.store.save(
            self.form.metadata.clone(),
            self.form.items().to_vec(),
            &snapshot,
        )
    }

    /// Replaces the form with a saved proposal.
    ///
    /// # Errors
    ///
    /// Returns `ProposalError::NotFound` if the record is gone; the form is
    /// left untouched.
    pub fn restore(&mut self, id: ProposalId) -> Result<(), ProposalError> {
        let record = self.store.load(id)?;
        self.form = ProposalForm::from_record(record);
        tracing::info!(session_id = %self.id, proposal_id = %id, "Proposal restored into editor");
        Ok(())
    }

    /// Discards edits and starts a blank form.
    pub fn reset(&mut self) {
        self.form = ProposalForm::from_config(&self.config, Local::now().naive_local());
    }

    /// Cost estimate for the current form, issued on `issued_on`.
    #[must_use]
    pub fn quote_document(&self, issued_on: NaiveDate) -> QuoteDocument {
        QuoteDocument::build(
            &self.form.metadata,
            self.form.items(),
            &self.form.snapshot(),
            issued_on,
            &self.config.currency,
        )
    }

    /// Service contract for the current form.
    #[must_use]
    pub fn contract_document(&self) -> ContractDocument {
        ContractDocument::build(
            &self.form.metadata,
            &self.form.snapshot(),
            &self.config.currency,
        )
    }

    /// History table in local time, most recent first.
    #[must_use]
    pub fn history(&self) -> Vec<HistoryRow> {
        history_rows(&self.store, &self.config.currency, &Local)
    }
}
