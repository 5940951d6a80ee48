//! Item CLI commands
//!
//! Implements CLI commands for the income and expense items of a budget.
//! Item positions are 1-based on the command line.

use clap::{Args, Subcommand};

use crate::config::settings::Settings;
use crate::error::{PocketError, PocketResult};
use crate::models::ItemKind;
use crate::services::{ItemService, SaveOutcome};
use crate::storage::Storage;

/// Which list of the budget a command works on
#[derive(Args, Debug, Clone, Copy)]
#[group(required = true, multiple = false)]
pub struct ListArg {
    /// Use the income list
    #[arg(long)]
    income: bool,

    /// Use the expense list
    #[arg(long)]
    expense: bool,
}

impl ListArg {
    pub fn kind(&self) -> ItemKind {
        if self.income {
            ItemKind::Income
        } else {
            ItemKind::Expense
        }
    }
}

/// Item subcommands
#[derive(Subcommand)]
pub enum ItemCommands {
    /// Add an item to a budget
    Add {
        /// Budget name or ID
        budget: String,
        #[command(flatten)]
        list: ListArg,
        /// Category name
        category: String,
        /// Amount (e.g., "800" or "800.00")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Edit an item's category or amount
    Edit {
        /// Budget name or ID
        budget: String,
        #[command(flatten)]
        list: ListArg,
        /// Item position (1-based)
        index: usize,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
    },

    /// Mark an item completed, or not completed again
    Toggle {
        /// Budget name or ID
        budget: String,
        #[command(flatten)]
        list: ListArg,
        /// Item position (1-based)
        index: usize,
    },

    /// Remove an item (can be undone)
    Remove {
        /// Budget name or ID
        budget: String,
        #[command(flatten)]
        list: ListArg,
        /// Item position (1-based)
        index: usize,
    },

    /// Bring back the most recently removed item
    Undo {
        /// Budget name or ID
        budget: String,
    },
}

fn to_index(position: usize) -> PocketResult<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| PocketError::Validation("Item positions start at 1".into()))
}

fn report_save(outcome: SaveOutcome, kind: ItemKind, verb: &str) {
    match outcome {
        SaveOutcome::Added(index) | SaveOutcome::Updated(index) => {
            println!("{} {} #{}", verb, kind, index + 1);
        }
        SaveOutcome::Discarded => {
            println!("Invalid item input; nothing saved.");
        }
    }
}

/// Handle an item command
pub fn handle_item_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: ItemCommands,
) -> PocketResult<()> {
    let mut service = ItemService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ItemCommands::Add {
            budget,
            list,
            category,
            amount,
        } => {
            let outcome = service.add(&budget, list.kind(), &category, &amount)?;
            report_save(outcome, list.kind(), "Added");
        }

        ItemCommands::Edit {
            budget,
            list,
            index,
            category,
            amount,
        } => {
            if category.is_none() && amount.is_none() {
                println!("No changes specified. Use --category or --amount.");
                return Ok(());
            }

            let outcome = service.edit(
                &budget,
                list.kind(),
                to_index(index)?,
                category.as_deref(),
                amount.as_deref(),
            )?;
            report_save(outcome, list.kind(), "Updated");
        }

        ItemCommands::Toggle {
            budget,
            list,
            index,
        } => {
            let completed = service.toggle(&budget, list.kind(), to_index(index)?)?;
            let state = if completed { "completed" } else { "not completed" };
            println!("Marked {} #{} as {}", list.kind(), index, state);
        }

        ItemCommands::Remove {
            budget,
            list,
            index,
        } => {
            let removed = service.remove(&budget, list.kind(), to_index(index)?)?;
            println!(
                "Removed {}: {} {}",
                list.kind(),
                removed.category(),
                removed.amount().format_with_symbol(symbol)
            );
            println!("Run 'pocket item undo {}' to bring it back.", budget);
        }

        ItemCommands::Undo { budget } => match service.undo(&budget)? {
            Some((kind, item)) => {
                println!(
                    "Restored {}: {} {}",
                    kind,
                    item.category(),
                    item.amount().format_with_symbol(symbol)
                );
            }
            None => println!("Nothing to undo."),
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_are_one_based() {
        assert_eq!(to_index(1).unwrap(), 0);
        assert_eq!(to_index(3).unwrap(), 2);
        assert!(to_index(0).unwrap_err().is_validation());
    }
}
