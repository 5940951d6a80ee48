//! Single-slot undo for deleted items
//!
//! Only the most recent deletion can be recovered. Undo re-appends the item
//! at the end of the list it came from, not at its old position.

use serde::{Deserialize, Serialize};

use super::budget::Budget;
use super::ids::BudgetId;
use super::item::{BudgetItem, ItemKind};
use crate::error::PocketResult;

/// An item removed from a budget, with where it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedItem {
    pub budget_id: BudgetId,
    pub kind: ItemKind,
    pub item: BudgetItem,
}

/// Holder for the last deleted item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoSlot {
    entry: Option<DeletedItem>,
}

impl UndoSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a slot from a previously held entry
    pub fn from_entry(entry: Option<DeletedItem>) -> Self {
        Self { entry }
    }

    pub fn entry(&self) -> Option<&DeletedItem> {
        self.entry.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }

    /// Remove an item from `budget` and hold it, replacing anything held before
    ///
    /// Returns `None` and leaves the slot untouched if `index` is out of range.
    pub fn remove_item(
        &mut self,
        budget: &mut Budget,
        kind: ItemKind,
        index: usize,
    ) -> Option<&BudgetItem> {
        let item = budget.remove_item(kind, index)?;

        if let Some(previous) = &self.entry {
            tracing::debug!(item = %previous.item.id(), "undo slot overwritten");
        }

        let entry = self.entry.insert(DeletedItem {
            budget_id: budget.id(),
            kind,
            item,
        });
        Some(&entry.item)
    }

    /// Re-append the held item to its original list in `budget`
    ///
    /// Returns the list the item went back to, or `None` if there was nothing
    /// to undo for this budget. A held item that is somehow still in the
    /// budget is dropped from the slot instead of being added twice. The slot
    /// is only cleared once the item is back.
    pub fn undo_last_delete(&mut self, budget: &mut Budget) -> PocketResult<Option<ItemKind>> {
        let Some(entry) = self.entry.as_ref().filter(|e| e.budget_id == budget.id()) else {
            return Ok(None);
        };

        if budget.position_of(entry.item.id()).is_some() {
            tracing::warn!(item = %entry.item.id(), "held item is still in the budget; dropping undo entry");
            self.entry = None;
            return Ok(None);
        }

        let kind = entry.kind;
        budget.push_item(kind, entry.item.clone())?;
        self.entry = None;
        Ok(Some(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use std::cell::Cell;
    use std::rc::Rc;

    fn sample_budget() -> Budget {
        let mut budget = Budget::new("June");
        for (category, cents) in [("Salary", 300000), ("Side gig", 25000)] {
            budget
                .push_item(ItemKind::Income, BudgetItem::new(category, Money::from_cents(cents)))
                .unwrap();
        }
        for (category, cents) in [("Rent", 90000), ("Food", 30000), ("Bus", 6000)] {
            budget
                .push_item(ItemKind::Expense, BudgetItem::new(category, Money::from_cents(cents)))
                .unwrap();
        }
        budget
    }

    #[test]
    fn test_undo_restores_identical_item_at_end() {
        let mut budget = sample_budget();
        budget.item_mut(ItemKind::Expense, 0).unwrap().toggle_completed();
        let original = budget.expense_items()[0].clone();
        let mut slot = UndoSlot::new();

        let removed = slot.remove_item(&mut budget, ItemKind::Expense, 0).unwrap();
        assert_eq!(removed, &original);
        assert_eq!(budget.expense_items().len(), 2);

        let restored = slot.undo_last_delete(&mut budget).unwrap();
        assert_eq!(restored, Some(ItemKind::Expense));
        assert!(slot.is_empty());

        let last = budget.expense_items().last().unwrap();
        assert_eq!(last, &original);
        assert_eq!(budget.expense_items()[0].category(), "Food");
    }

    #[test]
    fn test_second_undo_is_noop() {
        let mut budget = sample_budget();
        let mut slot = UndoSlot::new();

        slot.remove_item(&mut budget, ItemKind::Income, 1);
        slot.undo_last_delete(&mut budget).unwrap();
        let after_first = budget.clone();

        assert_eq!(slot.undo_last_delete(&mut budget).unwrap(), None);
        assert_eq!(budget, after_first);
    }

    #[test]
    fn test_only_last_delete_is_recoverable() {
        let mut budget = sample_budget();
        let mut slot = UndoSlot::new();

        slot.remove_item(&mut budget, ItemKind::Expense, 0);
        slot.remove_item(&mut budget, ItemKind::Income, 0);

        slot.undo_last_delete(&mut budget).unwrap();

        assert_eq!(budget.income_items().len(), 2);
        assert_eq!(budget.income_items()[1].category(), "Salary");
        assert_eq!(budget.expense_items().len(), 2);
        assert!(budget
            .expense_items()
            .iter()
            .all(|item| item.category() != "Rent"));
    }

    #[test]
    fn test_held_item_does_not_signal_budget() {
        let mut budget = sample_budget();
        let mut slot = UndoSlot::new();
        slot.remove_item(&mut budget, ItemKind::Expense, 2);

        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let _sub = budget.subscribe(move || seen.set(seen.get() + 1));

        assert_eq!(slot.entry().unwrap().item.changes().listener_count(), 0);

        slot.undo_last_delete(&mut budget).unwrap();
        assert_eq!(count.get(), 1);

        budget.item_mut(ItemKind::Expense, 2).unwrap().set_amount(Money::from_cents(1));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_undo_ignores_other_budgets() {
        let mut budget = sample_budget();
        let mut other = Budget::new("Elsewhere");
        let mut slot = UndoSlot::new();
        slot.remove_item(&mut budget, ItemKind::Income, 0);

        assert_eq!(slot.undo_last_delete(&mut other).unwrap(), None);
        assert!(!slot.is_empty());
        assert_eq!(other.item_count(), 0);
    }

    #[test]
    fn test_stale_entry_is_dropped_without_duplicating() {
        let mut budget = sample_budget();
        let saved = budget.clone();
        let mut slot = UndoSlot::new();
        slot.remove_item(&mut budget, ItemKind::Expense, 0);

        // The removal never reached the stored budget
        let mut budget = saved;
        assert_eq!(slot.undo_last_delete(&mut budget).unwrap(), None);

        assert!(slot.is_empty());
        assert_eq!(budget.expense_items().len(), 3);
        assert_eq!(
            budget
                .expense_items()
                .iter()
                .filter(|item| item.category() == "Rent")
                .count(),
            1
        );
    }

    #[test]
    fn test_out_of_range_remove_keeps_slot() {
        let mut budget = sample_budget();
        let mut slot = UndoSlot::new();
        slot.remove_item(&mut budget, ItemKind::Income, 0);
        let held = slot.clone();

        assert!(slot.remove_item(&mut budget, ItemKind::Expense, 10).is_none());
        assert_eq!(slot, held);
    }

    #[test]
    fn test_entry_serialization() {
        let mut budget = sample_budget();
        let mut slot = UndoSlot::new();
        slot.remove_item(&mut budget, ItemKind::Expense, 1);

        let json = serde_json::to_string(slot.entry().unwrap()).unwrap();
        let entry: DeletedItem = serde_json::from_str(&json).unwrap();

        assert_eq!(entry.kind, ItemKind::Expense);
        assert_eq!(entry.budget_id, budget.id());
        assert_eq!(entry.item.category(), "Food");
        assert_eq!(UndoSlot::from_entry(Some(entry)), slot);
    }
}
