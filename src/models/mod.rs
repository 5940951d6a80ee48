//! Core data models for Pocket Budget
//!
//! This module contains the data structures that represent the budgeting
//! domain: budgets, their income and expense items, money amounts and the
//! single-slot undo for deleted items.

pub mod budget;
pub mod ids;
pub mod item;
pub mod money;
pub mod undo;

pub use budget::{Budget, BudgetTotals, ItemMut};
pub use ids::{BudgetId, ItemId};
pub use item::{BudgetItem, ItemKind};
pub use money::{Money, MoneyParseError};
pub use undo::{DeletedItem, UndoSlot};
