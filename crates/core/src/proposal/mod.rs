//! Proposal history: saved snapshots of a budget plus event and contract
//! metadata, with JSON export and import.

pub mod error;
pub mod form;
pub mod history;
pub mod store;
pub mod types;


pub use error::ProposalError;
pub use form::ProposalForm;
pub use history::{HistoryRow, history_rows};
pub use store::ProposalStore;
pub use types::{
    ContractingParty, ElectricalRequirements, EventLogistics, PerformingParty, ProposalMetadata,
    ProposalRecord, ProposalStatus, Responsibilities, TeamComposition,
};
