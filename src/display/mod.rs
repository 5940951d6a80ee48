//! Display formatting for terminal output
//!
//! Provides utilities for formatting budgets for terminal display as tables
//! and summaries.

pub mod budget;

pub use budget::{format_budget_list, format_budget_summary, format_date};
