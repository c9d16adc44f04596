//! Core business logic for GigFlow.
//!
//! This crate contains pure business logic with ZERO file or network
//! dependencies. All domain types, validation rules, and calculations live
//! here.
//!
//! # Modules
//!
//! - `budget` - Line items and the cost breakdown
//! - `proposal` - Saved proposals, history export and import
//! - `document` - Data for the estimate and contract documents
//! - `session` - Per-user editing state

pub mod budget;
pub mod document;
pub mod proposal;
pub mod session;

pub use session::Session;
