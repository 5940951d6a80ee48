//! Service layer for Pocket Budget
//!
//! The service layer provides business logic on top of the storage layer,
//! handling input validation, name/ID lookup and the persisted undo entry.

pub mod budget;
pub mod item;

pub use budget::BudgetService;
pub use item::{save_draft, ItemDraft, ItemService, SaveOutcome};
