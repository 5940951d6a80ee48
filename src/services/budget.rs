//! Budget service
//!
//! Business logic for the budget collection: creating, finding, renaming,
//! deleting and restarting budgets.

use crate::error::{PocketError, PocketResult};
use crate::models::Budget;
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a mut Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Append a new, empty budget dated now
    pub fn create(&mut self, name: &str) -> PocketResult<&Budget> {
        let name = validate_name(name)?;

        self.storage.budgets.add(Budget::new(name));
        let index = self.storage.budgets.len() - 1;
        let budget = self
            .storage
            .budgets
            .get(index)
            .ok_or_else(|| PocketError::budget_not_found(name))?;

        tracing::debug!(budget = %budget.id(), name, "created budget");
        Ok(budget)
    }

    /// All budgets in display order
    pub fn list(&self) -> &[Budget] {
        self.storage.budgets.budgets()
    }

    /// Resolve a budget by name or ID to its index
    pub fn find(&self, identifier: &str) -> PocketResult<usize> {
        self.storage
            .budgets
            .find(identifier)
            .ok_or_else(|| PocketError::budget_not_found(identifier))
    }

    /// Get a budget by name or ID
    pub fn get(&self, identifier: &str) -> PocketResult<&Budget> {
        let index = self.find(identifier)?;
        self.storage
            .budgets
            .get(index)
            .ok_or_else(|| PocketError::budget_not_found(identifier))
    }

    /// Get a budget by name or ID for editing
    pub fn get_mut(&mut self, identifier: &str) -> PocketResult<&mut Budget> {
        let index = self.find(identifier)?;
        self.storage
            .budgets
            .get_mut(index)
            .ok_or_else(|| PocketError::budget_not_found(identifier))
    }

    /// Rename a budget
    pub fn rename(&mut self, identifier: &str, new_name: &str) -> PocketResult<&Budget> {
        let new_name = validate_name(new_name)?;
        let budget = self.get_mut(identifier)?;

        tracing::debug!(budget = %budget.id(), from = budget.name(), to = new_name, "renamed budget");
        budget.set_name(new_name);
        Ok(&*budget)
    }

    /// Remove a budget from the collection
    ///
    /// A pending undo entry that belonged to it is discarded.
    pub fn delete(&mut self, identifier: &str) -> PocketResult<Budget> {
        let index = self.find(identifier)?;
        let budget = self.storage.budgets.remove(index)?;

        let mut slot = self.storage.load_undo_slot();
        if slot.entry().is_some_and(|e| e.budget_id == budget.id()) {
            slot.clear();
            if let Err(e) = self.storage.save_undo_slot(&slot) {
                tracing::warn!(error = %e, "failed to clear undo entry");
            }
        }

        tracing::debug!(budget = %budget.id(), "deleted budget");
        Ok(budget)
    }

    /// Empty both lists of a budget and clear the "ready for budget" flag
    pub fn restart(&mut self, identifier: &str) -> PocketResult<&Budget> {
        let index = self.find(identifier)?;
        self.storage.set_ready_for_budget(false)?;

        let budget = self
            .storage
            .budgets
            .get_mut(index)
            .ok_or_else(|| PocketError::budget_not_found(identifier))?;
        budget.clear_items();

        tracing::debug!(budget = %budget.id(), "restarted budget");
        Ok(&*budget)
    }

    /// Mark the user as ready to budget
    pub fn start(&mut self) -> PocketResult<()> {
        self.storage.set_ready_for_budget(true)
    }

    pub fn is_ready(&self) -> bool {
        self.storage.is_ready_for_budget()
    }
}

fn validate_name(name: &str) -> PocketResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PocketError::Validation("Budget name cannot be empty".into()));
    }
    Ok(trimmed)
}
