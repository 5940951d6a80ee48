//! Pocket Budget - simple personal budgeting
//!
//! This library provides the core of the Pocket Budget application: named
//! budgets holding income and expense items, derived totals, change
//! notification, a persisted budget collection and single-slot undo for
//! deleted items.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: Tracing subscriber setup
//! - `models`: Core data models (budgets, items, money, undo)
//! - `observe`: Change signals and subscriptions
//! - `storage`: Key-value storage and the budget collection store
//! - `services`: Business logic layer
//! - `cli` / `display`: Command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use pocket_budget::models::{Budget, BudgetItem, ItemKind, Money};
//!
//! let mut budget = Budget::new("March");
//! budget.push_item(ItemKind::Income, BudgetItem::new("Salary", Money::from_cents(200000)))?;
//! assert_eq!(budget.balance(), Money::from_cents(200000));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod observe;
pub mod services;
pub mod storage;

pub use error::{PocketError, PocketResult};
