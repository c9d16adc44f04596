//! Proposal store error types.

use gigflow_shared::AppError;
use gigflow_shared::types::ProposalId;
use thiserror::Error;

/// Proposal-related errors.
#[derive(Debug, Error)]
pub enum ProposalError {
    /// No record with this id, e.g. already deleted.
    #[error("Proposal not found: {0}")]
    NotFound(ProposalId),

    /// Imported document is not a JSON array of proposal records.
    #[error("Failed to import history: {0}")]
    Parse(String),

    /// History could not be encoded.
    #[error("Failed to export history: {0}")]
    Serialize(String),
}

impl From<ProposalError> for AppError {
    fn from(err: ProposalError) -> Self {
        match err {
            ProposalError::NotFound(_) => Self::NotFound(err.to_string()),
            ProposalError::Parse(_) => Self::Parse(err.to_string()),
            ProposalError::Serialize(_) => Self::Internal(err.to_string()),
        }
    }
}
