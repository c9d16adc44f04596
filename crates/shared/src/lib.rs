//! Shared types, errors, and configuration for GigFlow.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for proposals and sessions
//! - Currency formatting for presentation
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
