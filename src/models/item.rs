//! Budget item model
//!
//! A single income or expense line. Every mutation goes through a setter so
//! the item can announce it on its change signal.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ItemId;
use super::money::Money;
use crate::observe::{ChangeSignal, Subscription};

/// Which of a budget's two lists an item lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Income,
    Expense,
}

impl ItemKind {
    /// Both kinds, in display order
    pub fn all() -> [ItemKind; 2] {
        [ItemKind::Income, ItemKind::Expense]
    }

    /// Section heading used when listing a budget
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expenses",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// One income or expense line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItem {
    id: ItemId,
    category: String,
    amount: Money,
    #[serde(default)]
    is_completed: bool,
    #[serde(skip)]
    changed: ChangeSignal,
}

impl BudgetItem {
    /// Create a new, not yet completed item
    pub fn new(category: impl Into<String>, amount: Money) -> Self {
        Self::create(category, amount, false)
    }

    /// Create an item with an explicit completion state
    pub fn create(category: impl Into<String>, amount: Money, is_completed: bool) -> Self {
        Self {
            id: ItemId::new(),
            category: category.into(),
            amount,
            is_completed,
            changed: ChangeSignal::new(),
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Amount still outstanding: the full amount until the item is completed
    pub fn outstanding(&self) -> Money {
        if self.is_completed {
            Money::zero()
        } else {
            self.amount
        }
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
        self.changed.emit();
    }

    pub fn set_amount(&mut self, amount: Money) {
        self.amount = amount;
        self.changed.emit();
    }

    pub fn toggle_completed(&mut self) {
        self.is_completed = !self.is_completed;
        self.changed.emit();
    }

    /// The item's own change signal
    pub fn changes(&self) -> &ChangeSignal {
        &self.changed
    }

    /// Listen for mutations of this item
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        self.changed.subscribe(listener)
    }
}

impl PartialEq for BudgetItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.category == other.category
            && self.amount == other.amount
            && self.is_completed == other.is_completed
    }
}

impl Eq for BudgetItem {}

impl fmt::Display for BudgetItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.is_completed { "x" } else { " " };
        write!(f, "[{}] {} {}", mark, self.category, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_new_item_defaults() {
        let item = BudgetItem::new("Salary", Money::from_cents(200000));

        assert_eq!(item.category(), "Salary");
        assert_eq!(item.amount().cents(), 200000);
        assert!(!item.is_completed());
        assert_eq!(item.outstanding(), item.amount());
    }

    #[test]
    fn test_every_setter_emits_once() {
        let mut item = BudgetItem::new("Rent", Money::from_cents(80000));
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let _sub = item.subscribe(move || seen.set(seen.get() + 1));

        item.set_category("Rent (flat)");
        assert_eq!(count.get(), 1);
        item.set_amount(Money::from_cents(85000));
        assert_eq!(count.get(), 2);
        item.toggle_completed();
        assert_eq!(count.get(), 3);

        assert_eq!(item.category(), "Rent (flat)");
        assert_eq!(item.amount().cents(), 85000);
        assert!(item.is_completed());
        assert!(item.outstanding().is_zero());
    }

    #[test]
    fn test_serialization_shape() {
        let item = BudgetItem::create("Food", Money::from_cents(20050), true);
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["category"], "Food");
        assert_eq!(value["amount"], 200.5);
        assert_eq!(value["isCompleted"], true);
        assert_eq!(value["id"], item.id().as_uuid().to_string());
        assert_eq!(value.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_deserialize_ignores_unknown_and_defaults_completion() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "category": "Gift",
            "amount": 25,
            "note": "from grandma"
        }"#;
        let item: BudgetItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.category(), "Gift");
        assert_eq!(item.amount().cents(), 2500);
        assert!(!item.is_completed());
    }

    #[test]
    fn test_clone_does_not_share_listeners() {
        let item = BudgetItem::new("Fuel", Money::from_cents(6000));
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let _sub = item.subscribe(move || seen.set(seen.get() + 1));

        let mut copy = item.clone();
        copy.toggle_completed();

        assert_eq!(count.get(), 0);
        assert_eq!(copy.id(), item.id());
    }

    #[test]
    fn test_display() {
        let mut item = BudgetItem::new("Rent", Money::from_cents(80000));
        assert_eq!(item.to_string(), "[ ] Rent $800.00");
        item.toggle_completed();
        assert_eq!(item.to_string(), "[x] Rent $800.00");
    }
}
