//! Budget engine: line items, coercion of raw input, and cost breakdown.

pub mod coerce;
pub mod error;
pub mod service;
pub mod template;
pub mod types;


pub use coerce::{clamp_amount, coerce_amount};
pub use error::BudgetError;
pub use service::BudgetService;
pub use template::default_line_items;
pub use types::{BudgetSnapshot, LineItem};
