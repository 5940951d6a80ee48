//! Budget CLI commands
//!
//! Implements CLI commands for managing the budget collection.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::budget::{format_budget_list, format_budget_summary};
use crate::error::PocketResult;
use crate::services::BudgetService;
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create a new, empty budget
    Create {
        /// Budget name
        name: String,
    },

    /// List all budgets
    List,

    /// Show a budget with its items and totals
    Show {
        /// Budget name or ID
        budget: String,
    },

    /// Rename a budget
    Rename {
        /// Budget name or ID
        budget: String,
        /// New name
        name: String,
    },

    /// Delete a budget
    Delete {
        /// Budget name or ID
        budget: String,
    },

    /// Remove every item from a budget and start over
    Restart {
        /// Budget name or ID
        budget: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> PocketResult<()> {
    let mut service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Create { name } => {
            let budget = service.create(&name)?;
            println!("Created budget: {}", budget.name());
            println!("  ID: {}", budget.id());
        }

        BudgetCommands::List => {
            print!("{}", format_budget_list(service.list(), settings));
        }

        BudgetCommands::Show { budget } => {
            let budget = service.get(&budget)?;
            print!("{}", format_budget_summary(budget, settings));
        }

        BudgetCommands::Rename { budget, name } => {
            let renamed = service.rename(&budget, &name)?;
            println!("Renamed budget '{}' to '{}'", budget, renamed.name());
        }

        BudgetCommands::Delete { budget } => {
            let removed = service.delete(&budget)?;
            println!("Deleted budget: {}", removed.name());
        }

        BudgetCommands::Restart { budget } => {
            let budget = service.restart(&budget)?;
            println!("Restarted budget: {}", budget.name());
            println!("Run 'pocket start' when you're ready to budget again.");
        }
    }

    Ok(())
}
