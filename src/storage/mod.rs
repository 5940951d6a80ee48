//! Storage layer for Pocket Budget
//!
//! Everything persisted lives in named slots of a per-app key-value store:
//! the budget collection, the "ready for budget" flag and the pending undo
//! entry.

pub mod budgets;
pub mod file_io;
pub mod kv;

pub use budgets::{load_all, save_all, BudgetStore, BUDGETS_KEY};
pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};

use crate::config::paths::PocketPaths;
use crate::error::PocketError;
use crate::models::{DeletedItem, UndoSlot};

/// Slot recording whether the user has started the current budgeting flow
pub const READY_KEY: &str = "isReadyForBudget";

/// Slot holding the most recently deleted item
pub const RECENTLY_DELETED_KEY: &str = "RecentlyDeleted";

/// Main storage coordinator: the key-value backend plus the loaded budgets
pub struct Storage {
    kv: Box<dyn KeyValueStore>,
    pub budgets: BudgetStore,
}

impl Storage {
    /// Open file-backed storage under the configured data directory
    pub fn open(paths: &PocketPaths) -> Result<Self, PocketError> {
        paths.ensure_directories()?;
        Ok(Self::with_backend(Box::new(FileKeyValueStore::new(
            paths.data_dir(),
        ))))
    }

    /// Storage that lives only in memory
    pub fn in_memory() -> Self {
        Self::with_backend(Box::new(MemoryKeyValueStore::new()))
    }

    /// Storage over any key-value backend
    pub fn with_backend(kv: Box<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            budgets: BudgetStore::new(),
        }
    }

    /// The key-value backend
    pub fn kv(&self) -> &dyn KeyValueStore {
        self.kv.as_ref()
    }

    /// Load the budget collection from disk
    pub fn load(&mut self) {
        self.budgets.load(self.kv.as_ref());
    }

    /// Write the budget collection to disk, returning whether it was written
    pub fn save(&self) -> bool {
        self.budgets.save(self.kv.as_ref())
    }

    pub fn is_ready_for_budget(&self) -> bool {
        self.kv.get_bool(READY_KEY)
    }

    pub fn set_ready_for_budget(&self, ready: bool) -> Result<(), PocketError> {
        self.kv.set_bool(READY_KEY, ready)
    }

    /// Read the persisted undo slot; anything unreadable counts as empty
    pub fn load_undo_slot(&self) -> UndoSlot {
        let entry = match self.kv.get(RECENTLY_DELETED_KEY) {
            Ok(Some(bytes)) => serde_json::from_slice::<DeletedItem>(&bytes)
                .map_err(|e| tracing::warn!(error = %e, "ignoring unreadable undo entry"))
                .ok(),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read undo entry");
                None
            }
        };
        UndoSlot::from_entry(entry)
    }

    /// Persist the undo slot, clearing the stored entry when the slot is empty
    pub fn save_undo_slot(&self, slot: &UndoSlot) -> Result<(), PocketError> {
        match slot.entry() {
            Some(entry) => {
                let bytes = serde_json::to_vec_pretty(entry)?;
                self.kv.set(RECENTLY_DELETED_KEY, &bytes)
            }
            None => self.kv.remove(RECENTLY_DELETED_KEY),
        }
    }
}
