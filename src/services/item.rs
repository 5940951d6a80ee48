//! Item service
//!
//! Adding, editing, toggling and removing budget items, plus the persisted
//! single-slot undo for removals.

use crate::error::{PocketError, PocketResult};
use crate::models::{Budget, BudgetItem, ItemKind, Money};
use crate::storage::Storage;

/// Validated input for a new or edited item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub category: String,
    pub amount: Money,
}

impl ItemDraft {
    /// Build a draft from raw text fields
    ///
    /// Returns `None` when the category is blank or the amount doesn't parse.
    pub fn parse(category: &str, amount_text: &str) -> Option<Self> {
        let category = category.trim();
        if category.is_empty() {
            return None;
        }

        let amount = Money::parse(amount_text).ok()?;
        Some(Self {
            category: category.to_string(),
            amount,
        })
    }
}

/// What an edit-save did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new item was appended at this index
    Added(usize),
    /// The item at this index was updated in place
    Updated(usize),
    /// The input was invalid and nothing changed
    Discarded,
}

/// Apply an edit-save to a budget list
///
/// With a selected index the item there gets the draft's category and amount;
/// without one the draft is appended as a new, not completed item. A `None`
/// draft leaves the budget untouched.
pub fn save_draft(
    budget: &mut Budget,
    kind: ItemKind,
    selected: Option<usize>,
    draft: Option<ItemDraft>,
) -> SaveOutcome {
    let Some(draft) = draft else {
        tracing::debug!(budget = %budget.id(), "discarding invalid item input");
        return SaveOutcome::Discarded;
    };

    match selected {
        Some(index) => match budget.item_mut(kind, index) {
            Some(mut item) => {
                item.set_category(draft.category);
                item.set_amount(draft.amount);
                SaveOutcome::Updated(index)
            }
            None => {
                tracing::warn!(budget = %budget.id(), %kind, index, "selected item no longer exists");
                SaveOutcome::Discarded
            }
        },
        None => match budget.push_item(kind, BudgetItem::new(draft.category, draft.amount)) {
            Ok(()) => SaveOutcome::Added(budget.items(kind).len() - 1),
            Err(e) => {
                tracing::warn!(budget = %budget.id(), error = %e, "failed to append item");
                SaveOutcome::Discarded
            }
        },
    }
}

/// Service for item management within a budget
pub struct ItemService<'a> {
    storage: &'a mut Storage,
}

impl<'a> ItemService<'a> {
    /// Create a new item service
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    fn budget_mut(&mut self, identifier: &str) -> PocketResult<&mut Budget> {
        let index = self
            .storage
            .budgets
            .find(identifier)
            .ok_or_else(|| PocketError::budget_not_found(identifier))?;

        self.storage
            .budgets
            .get_mut(index)
            .ok_or_else(|| PocketError::budget_not_found(identifier))
    }

    /// Append a new item from raw input
    pub fn add(
        &mut self,
        budget: &str,
        kind: ItemKind,
        category: &str,
        amount_text: &str,
    ) -> PocketResult<SaveOutcome> {
        let budget = self.budget_mut(budget)?;
        Ok(save_draft(
            budget,
            kind,
            None,
            ItemDraft::parse(category, amount_text),
        ))
    }

    /// Edit the item at `index`; fields left out keep their current value
    pub fn edit(
        &mut self,
        budget: &str,
        kind: ItemKind,
        index: usize,
        category: Option<&str>,
        amount_text: Option<&str>,
    ) -> PocketResult<SaveOutcome> {
        let budget = self.budget_mut(budget)?;
        let current = budget
            .items(kind)
            .get(index)
            .ok_or_else(|| PocketError::item_not_found(format!("{} #{}", kind, index + 1)))?;

        let category = category.unwrap_or(current.category()).to_string();
        let amount_text = match amount_text {
            Some(text) => text.to_string(),
            None => current.amount().to_string(),
        };

        Ok(save_draft(
            budget,
            kind,
            Some(index),
            ItemDraft::parse(&category, &amount_text),
        ))
    }

    /// Flip the completed flag of the item at `index`, returning the new value
    pub fn toggle(&mut self, budget: &str, kind: ItemKind, index: usize) -> PocketResult<bool> {
        let budget = self.budget_mut(budget)?;
        let mut item = budget
            .item_mut(kind, index)
            .ok_or_else(|| PocketError::item_not_found(format!("{} #{}", kind, index + 1)))?;

        item.toggle_completed();
        Ok(item.is_completed())
    }

    /// Remove the item at `index`, holding it for a later undo
    ///
    /// Any previously held item is dropped.
    pub fn remove(&mut self, budget: &str, kind: ItemKind, index: usize) -> PocketResult<BudgetItem> {
        let mut slot = self.storage.load_undo_slot();
        let budget = self.budget_mut(budget)?;

        let removed = slot
            .remove_item(budget, kind, index)
            .cloned()
            .ok_or_else(|| PocketError::item_not_found(format!("{} #{}", kind, index + 1)))?;

        if let Err(e) = self.storage.save_undo_slot(&slot) {
            tracing::warn!(error = %e, "failed to persist undo entry");
        }
        Ok(removed)
    }

    /// Re-append the most recently removed item of this budget
    ///
    /// Returns the restored item and its list, or `None` when there is
    /// nothing to undo.
    pub fn undo(&mut self, budget: &str) -> PocketResult<Option<(ItemKind, BudgetItem)>> {
        let mut slot = self.storage.load_undo_slot();
        let held = !slot.is_empty();
        let budget = self.budget_mut(budget)?;

        let restored = slot
            .undo_last_delete(budget)?
            .and_then(|kind| budget.items(kind).last().cloned().map(|item| (kind, item)));

        // Also covers a stale entry the slot dropped without restoring
        if held && slot.is_empty() {
            if let Err(e) = self.storage.save_undo_slot(&slot) {
                tracing::warn!(error = %e, "failed to clear undo entry");
            }
        }
        Ok(restored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn storage_with_budget() -> Storage {
        let mut storage = Storage::in_memory();
        let mut budget = Budget::new("March");
        budget
            .push_item(ItemKind::Income, BudgetItem::new("Salary", Money::from_cents(200000)))
            .unwrap();
        budget
            .push_item(ItemKind::Expense, BudgetItem::new("Rent", Money::from_cents(80000)))
            .unwrap();
        budget
            .push_item(ItemKind::Expense, BudgetItem::new("Food", Money::from_cents(20000)))
            .unwrap();
        storage.budgets.add(budget);
        storage
    }

    #[test]
    fn test_draft_parse() {
        assert_eq!(
            ItemDraft::parse("  Rent ", "$800.50"),
            Some(ItemDraft {
                category: "Rent".into(),
                amount: Money::from_cents(80050),
            })
        );
        assert_eq!(ItemDraft::parse("Food", "12.5").unwrap().amount, Money::from_cents(1250));
        assert!(ItemDraft::parse("   ", "10").is_none());
        assert!(ItemDraft::parse("Food", "ten").is_none());
        assert!(ItemDraft::parse("Food", "").is_none());
    }

    #[test]
    fn test_save_draft_appends_without_selection() {
        let mut budget = Budget::new("April");
        let outcome = save_draft(
            &mut budget,
            ItemKind::Expense,
            None,
            ItemDraft::parse("Phone", "45"),
        );

        assert_eq!(outcome, SaveOutcome::Added(0));
        let item = &budget.expense_items()[0];
        assert_eq!(item.category(), "Phone");
        assert!(!item.is_completed());
        assert_eq!(budget.link_count(), 1);
    }

    #[test]
    fn test_save_draft_updates_selected_item_twice() {
        let mut storage = storage_with_budget();
        let budget = storage.budgets.get_mut(0).unwrap();
        let id = budget.expense_items()[1].id();

        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let _sub = budget.subscribe(move || seen.set(seen.get() + 1));

        let outcome = save_draft(
            budget,
            ItemKind::Expense,
            Some(1),
            ItemDraft::parse("Groceries", "250"),
        );

        assert_eq!(outcome, SaveOutcome::Updated(1));
        assert_eq!(count.get(), 2);
        let item = &budget.expense_items()[1];
        assert_eq!(item.id(), id);
        assert_eq!(item.category(), "Groceries");
        assert_eq!(item.amount(), Money::from_cents(25000));
    }

    #[test]
    fn test_invalid_input_is_discarded() {
        let mut storage = storage_with_budget();
        let before = storage.budgets.get(0).unwrap().clone();

        let mut service = ItemService::new(&mut storage);
        assert_eq!(
            service.add("March", ItemKind::Income, "Bonus", "lots").unwrap(),
            SaveOutcome::Discarded
        );
        assert_eq!(
            service
                .edit("March", ItemKind::Expense, 0, Some(" "), None)
                .unwrap(),
            SaveOutcome::Discarded
        );

        assert_eq!(storage.budgets.get(0).unwrap(), &before);
    }

    #[test]
    fn test_edit_keeps_unspecified_fields() {
        let mut storage = storage_with_budget();
        let mut service = ItemService::new(&mut storage);

        service
            .edit("March", ItemKind::Expense, 0, None, Some("950"))
            .unwrap();
        service
            .edit("March", ItemKind::Expense, 1, Some("Eating out"), None)
            .unwrap();

        let budget = storage.budgets.get(0).unwrap();
        assert_eq!(budget.expense_items()[0].category(), "Rent");
        assert_eq!(budget.expense_items()[0].amount(), Money::from_cents(95000));
        assert_eq!(budget.expense_items()[1].category(), "Eating out");
        assert_eq!(budget.expense_items()[1].amount(), Money::from_cents(20000));
    }

    #[test]
    fn test_edit_out_of_range() {
        let mut storage = storage_with_budget();
        let mut service = ItemService::new(&mut storage);

        let err = service
            .edit("March", ItemKind::Income, 5, Some("Bonus"), Some("10"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_toggle_updates_outstanding() {
        let mut storage = storage_with_budget();
        let mut service = ItemService::new(&mut storage);

        assert!(service.toggle("March", ItemKind::Expense, 1).unwrap());

        let budget = storage.budgets.get(0).unwrap();
        assert_eq!(budget.outstanding_expenses(), Money::from_cents(80000));
        assert_eq!(budget.total_expenses(), Money::from_cents(100000));
    }

    #[test]
    fn test_remove_then_undo_persists_slot() {
        let mut storage = storage_with_budget();

        let removed = ItemService::new(&mut storage)
            .remove("March", ItemKind::Expense, 0)
            .unwrap();
        assert_eq!(removed.category(), "Rent");
        assert!(!storage.load_undo_slot().is_empty());
        assert_eq!(storage.budgets.get(0).unwrap().expense_items().len(), 1);

        let restored = ItemService::new(&mut storage).undo("March").unwrap();
        let (kind, item) = restored.unwrap();
        assert_eq!(kind, ItemKind::Expense);
        assert_eq!(item, removed);

        let budget = storage.budgets.get(0).unwrap();
        assert_eq!(budget.expense_items()[0].category(), "Food");
        assert_eq!(budget.expense_items()[1].category(), "Rent");
        assert!(storage.load_undo_slot().is_empty());

        assert!(ItemService::new(&mut storage).undo("March").unwrap().is_none());
    }

    #[test]
    fn test_undo_after_lost_removal_does_not_error() {
        let mut storage = storage_with_budget();
        assert!(storage.save());

        ItemService::new(&mut storage)
            .remove("March", ItemKind::Expense, 0)
            .unwrap();
        // Session ends without the removal being written
        storage.load();
        assert_eq!(storage.budgets.get(0).unwrap().expense_items().len(), 2);

        let restored = ItemService::new(&mut storage).undo("March").unwrap();
        assert!(restored.is_none());
        assert!(storage.load_undo_slot().is_empty());

        let budget = storage.budgets.get(0).unwrap();
        assert_eq!(budget.expense_items().len(), 2);
        assert_eq!(budget.expense_items()[0].category(), "Rent");
    }

    #[test]
    fn test_remove_out_of_range_keeps_slot() {
        let mut storage = storage_with_budget();
        let mut service = ItemService::new(&mut storage);
        service.remove("March", ItemKind::Income, 0).unwrap();

        assert!(service
            .remove("March", ItemKind::Income, 0)
            .unwrap_err()
            .is_not_found());
        let slot = storage.load_undo_slot();
        assert_eq!(slot.entry().unwrap().item.category(), "Salary");
    }
}
