//! Budget collection store
//!
//! The whole collection is one JSON array written to a single slot. Loading
//! and saving fail soft: a missing or corrupt document loads as an empty
//! collection, and a failed write is dropped after a warning.

use crate::error::{PocketError, PocketResult};
use crate::models::{Budget, BudgetId};

use super::kv::KeyValueStore;

/// Slot holding the serialized budget collection
pub const BUDGETS_KEY: &str = "Budgets";

/// Read the budget collection, or an empty one if it is missing or unreadable
pub fn load_all(kv: &dyn KeyValueStore) -> Vec<Budget> {
    let bytes = match kv.get(BUDGETS_KEY) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            tracing::debug!("no saved budgets");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to read budgets; starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_slice::<Vec<Budget>>(&bytes) {
        Ok(budgets) => {
            tracing::debug!(count = budgets.len(), "loaded budgets");
            budgets
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to parse budgets; starting empty");
            Vec::new()
        }
    }
}

/// Write the budget collection, returning whether the write happened
pub fn save_all(kv: &dyn KeyValueStore, budgets: &[Budget]) -> bool {
    let bytes = match serde_json::to_vec_pretty(budgets) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "failed to serialize budgets; write dropped");
            return false;
        }
    };

    match kv.set(BUDGETS_KEY, &bytes) {
        Ok(()) => {
            tracing::debug!(count = budgets.len(), "saved budgets");
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to write budgets; write dropped");
            false
        }
    }
}

/// The ordered, in-memory budget collection
///
/// Budgets are handed out by mutable borrow, so edits are visible here
/// immediately; only the write to disk waits for [`BudgetStore::save`].
#[derive(Debug, Default)]
pub struct BudgetStore {
    budgets: Vec<Budget>,
}

impl BudgetStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from existing budgets
    pub fn from_budgets(budgets: Vec<Budget>) -> Self {
        Self { budgets }
    }

    /// Replace the contents with whatever is saved in `kv`
    pub fn load(&mut self, kv: &dyn KeyValueStore) {
        self.budgets = load_all(kv);
    }

    /// Persist the contents to `kv`
    pub fn save(&self, kv: &dyn KeyValueStore) -> bool {
        save_all(kv, &self.budgets)
    }

    /// Append a budget
    pub fn add(&mut self, budget: Budget) {
        self.budgets.push(budget);
    }

    /// Remove the budget at `index`
    pub fn remove(&mut self, index: usize) -> PocketResult<Budget> {
        if index >= self.budgets.len() {
            return Err(PocketError::budget_not_found(format!("#{}", index + 1)));
        }
        Ok(self.budgets.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Budget> {
        self.budgets.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Budget> {
        self.budgets.get_mut(index)
    }

    /// All budgets in display order
    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }

    /// Index of the budget with the given ID
    pub fn position_of(&self, id: BudgetId) -> Option<usize> {
        self.budgets.iter().position(|b| b.id() == id)
    }

    /// Find a budget index by name (case-insensitive) or ID
    ///
    /// IDs may be given in full or in the short `bud-xxxxxxxx` display form.
    pub fn find(&self, identifier: &str) -> Option<usize> {
        let identifier = identifier.trim();
        let lower = identifier.to_lowercase();

        if let Some(index) = self
            .budgets
            .iter()
            .position(|b| b.name().to_lowercase() == lower)
        {
            return Some(index);
        }

        if let Ok(id) = identifier.parse::<BudgetId>() {
            return self.position_of(id);
        }

        self.budgets.iter().position(|b| b.id().matches_short(identifier))
    }
}
