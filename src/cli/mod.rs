//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod item;

pub use budget::{handle_budget_command, BudgetCommands};
pub use item::{handle_item_command, ItemCommands, ListArg};
