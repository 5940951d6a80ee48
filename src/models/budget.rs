//! Budget model
//!
//! A budget owns two ordered lists of items, income and expenses, and
//! re-broadcasts every item mutation on its own change signal. Totals are
//! derived from the live lists on every call and never cached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

use super::ids::{BudgetId, ItemId};
use super::item::{BudgetItem, ItemKind};
use super::money::Money;
use crate::error::{PocketError, PocketResult};
use crate::observe::{ChangeSignal, Subscription};

/// A named collection of income and expense items
///
/// Structural changes (adding, removing or replacing items) are modelled as
/// list replacement: afterwards the budget drops every per-item link and
/// subscribes once to each current item. An item that has left the budget
/// can therefore never reach the budget's signal again.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "BudgetRecord")]
pub struct Budget {
    id: BudgetId,
    name: String,
    date: DateTime<Utc>,
    income_items: Vec<BudgetItem>,
    expense_items: Vec<BudgetItem>,
    #[serde(skip)]
    changed: ChangeSignal,
    #[serde(skip)]
    links: Vec<Subscription>,
}

/// On-disk shape of a budget, before links are established
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BudgetRecord {
    id: BudgetId,
    #[serde(default)]
    name: String,
    date: DateTime<Utc>,
    #[serde(default)]
    income_items: Vec<BudgetItem>,
    #[serde(default)]
    expense_items: Vec<BudgetItem>,
}

impl From<BudgetRecord> for Budget {
    fn from(record: BudgetRecord) -> Self {
        Budget::from_parts(
            record.id,
            record.name,
            record.date,
            record.income_items,
            record.expense_items,
        )
    }
}

/// Derived totals for a budget at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BudgetTotals {
    pub total_income: Money,
    pub total_expenses: Money,
    pub balance: Money,
    pub outstanding_income: Money,
    pub outstanding_expenses: Money,
    pub outstanding_balance: Money,
}

impl Budget {
    /// Create an empty budget dated now
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_parts(BudgetId::new(), name.into(), Utc::now(), Vec::new(), Vec::new())
    }

    /// Assemble a budget from stored parts and link every item
    pub fn from_parts(
        id: BudgetId,
        name: String,
        date: DateTime<Utc>,
        income_items: Vec<BudgetItem>,
        expense_items: Vec<BudgetItem>,
    ) -> Self {
        let mut budget = Self {
            id,
            name,
            date,
            income_items,
            expense_items,
            changed: ChangeSignal::new(),
            links: Vec::new(),
        };
        budget.relink();
        budget
    }

    pub fn id(&self) -> BudgetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creation timestamp; edits never touch it
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.changed.emit();
    }

    pub fn income_items(&self) -> &[BudgetItem] {
        &self.income_items
    }

    pub fn expense_items(&self) -> &[BudgetItem] {
        &self.expense_items
    }

    pub fn items(&self, kind: ItemKind) -> &[BudgetItem] {
        match kind {
            ItemKind::Income => &self.income_items,
            ItemKind::Expense => &self.expense_items,
        }
    }

    fn list_mut(&mut self, kind: ItemKind) -> &mut Vec<BudgetItem> {
        match kind {
            ItemKind::Income => &mut self.income_items,
            ItemKind::Expense => &mut self.expense_items,
        }
    }

    /// Total number of items across both lists
    pub fn item_count(&self) -> usize {
        self.income_items.len() + self.expense_items.len()
    }

    /// Locate an item by ID
    pub fn position_of(&self, id: ItemId) -> Option<(ItemKind, usize)> {
        ItemKind::all().into_iter().find_map(|kind| {
            self.items(kind)
                .iter()
                .position(|item| item.id() == id)
                .map(|index| (kind, index))
        })
    }

    /// Borrow an item for editing in place
    pub fn item_mut(&mut self, kind: ItemKind, index: usize) -> Option<ItemMut<'_>> {
        self.list_mut(kind).get_mut(index).map(|item| ItemMut { item })
    }

    /// Borrow an item for editing by ID
    pub fn item_by_id_mut(&mut self, id: ItemId) -> Option<ItemMut<'_>> {
        let (kind, index) = self.position_of(id)?;
        self.item_mut(kind, index)
    }

    /// Append an item to the end of a list
    ///
    /// Fails if an item with the same ID is already in this budget.
    pub fn push_item(&mut self, kind: ItemKind, item: BudgetItem) -> PocketResult<()> {
        if self.position_of(item.id()).is_some() {
            return Err(PocketError::Duplicate {
                entity_type: "Item",
                identifier: item.id().to_string(),
            });
        }

        self.list_mut(kind).push(item);
        self.lists_replaced();
        Ok(())
    }

    /// Remove the item at `index`, returning it
    pub fn remove_item(&mut self, kind: ItemKind, index: usize) -> Option<BudgetItem> {
        let list = self.list_mut(kind);
        if index >= list.len() {
            return None;
        }

        let item = list.remove(index);
        self.lists_replaced();
        Some(item)
    }

    /// Replace a whole list, returning the previous contents
    pub fn replace_items(&mut self, kind: ItemKind, items: Vec<BudgetItem>) -> Vec<BudgetItem> {
        let old = std::mem::replace(self.list_mut(kind), items);
        self.lists_replaced();
        old
    }

    /// Empty both lists
    pub fn clear_items(&mut self) {
        self.replace_items(ItemKind::Income, Vec::new());
        self.replace_items(ItemKind::Expense, Vec::new());
    }

    /// The budget's change signal
    pub fn changes(&self) -> &ChangeSignal {
        &self.changed
    }

    /// Listen for any change to this budget or one of its items
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        self.changed.subscribe(listener)
    }

    /// Number of live item links
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    fn lists_replaced(&mut self) {
        self.relink();
        tracing::debug!(
            budget = %self.id,
            income = self.income_items.len(),
            expenses = self.expense_items.len(),
            "budget lists replaced"
        );
        self.changed.emit();
    }

    fn relink(&mut self) {
        self.links.clear();
        let links: Vec<Subscription> = self
            .income_items
            .iter()
            .chain(self.expense_items.iter())
            .map(|item| item.subscribe(self.changed.forwarder()))
            .collect();
        self.links = links;
    }

    pub fn total_income(&self) -> Money {
        self.income_items.iter().map(BudgetItem::amount).sum()
    }

    pub fn total_expenses(&self) -> Money {
        self.expense_items.iter().map(BudgetItem::amount).sum()
    }

    pub fn balance(&self) -> Money {
        self.total_income() - self.total_expenses()
    }

    pub fn outstanding_income(&self) -> Money {
        self.income_items.iter().map(BudgetItem::outstanding).sum()
    }

    pub fn outstanding_expenses(&self) -> Money {
        self.expense_items.iter().map(BudgetItem::outstanding).sum()
    }

    pub fn outstanding_balance(&self) -> Money {
        self.outstanding_income() - self.outstanding_expenses()
    }

    /// All derived totals at once
    pub fn totals(&self) -> BudgetTotals {
        BudgetTotals {
            total_income: self.total_income(),
            total_expenses: self.total_expenses(),
            balance: self.balance(),
            outstanding_income: self.outstanding_income(),
            outstanding_expenses: self.outstanding_expenses(),
            outstanding_balance: self.outstanding_balance(),
        }
    }
}

impl Clone for Budget {
    fn clone(&self) -> Self {
        Self::from_parts(
            self.id,
            self.name.clone(),
            self.date,
            self.income_items.clone(),
            self.expense_items.clone(),
        )
    }
}

impl PartialEq for Budget {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.date == other.date
            && self.income_items == other.income_items
            && self.expense_items == other.expense_items
    }
}

impl Eq for Budget {}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.date.format("%Y-%m-%d"))
    }
}

/// Mutable access to one item inside a budget
///
/// Reads go through `Deref`; writes only through the item's setters, so the
/// item (and the link to its budget) cannot be swapped out from under it.
pub struct ItemMut<'a> {
    item: &'a mut BudgetItem,
}

impl ItemMut<'_> {
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.item.set_category(category);
    }

    pub fn set_amount(&mut self, amount: Money) {
        self.item.set_amount(amount);
    }

    pub fn toggle_completed(&mut self) {
        self.item.toggle_completed();
    }
}

impl Deref for ItemMut<'_> {
    type Target = BudgetItem;

    fn deref(&self) -> &BudgetItem {
        &*self.item
    }
}
