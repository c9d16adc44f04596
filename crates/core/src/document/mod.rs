//! Structured data for the cost-estimate and service-contract documents.
//!
//! Layout and rendering belong to the caller; everything here is plain
//! data with amounts already formatted for display.

pub mod contract;
pub mod quote;

pub use contract::{Clause, ContractDocument, EventSection, Signatures};
pub use quote::{QuoteDocument, QuoteRow};
