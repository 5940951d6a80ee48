//! Budget display formatting
//!
//! Formats budgets for terminal output in list and summary views.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

use crate::config::settings::Settings;
use crate::models::{Budget, BudgetItem, ItemKind, Money};

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a date with the user's preferred format
///
/// An invalid strftime string falls back to `YYYY-MM-DD`.
pub fn format_date(date: DateTime<Utc>, settings: &Settings) -> String {
    let format = if StrftimeItems::new(&settings.date_format).any(|i| matches!(i, Item::Error)) {
        FALLBACK_DATE_FORMAT
    } else {
        settings.date_format.as_str()
    };
    date.format(format).to_string()
}

fn money(amount: Money, settings: &Settings) -> String {
    amount.format_with_symbol(&settings.currency_symbol)
}

/// Format the budget collection as a table
pub fn format_budget_list(budgets: &[Budget], settings: &Settings) -> String {
    if budgets.is_empty() {
        return "No budgets found.\n\nRun 'pocket budget create <name>' to add one.".to_string();
    }

    let name_width = budgets
        .iter()
        .map(|b| b.name().chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<10}  {:>5}  {:>12}  {}\n",
        "Name",
        "Created",
        "Items",
        "Balance",
        "ID",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<10}  {:->5}  {:->12}  {:-<12}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for budget in budgets {
        output.push_str(&format!(
            "{:<name_width$}  {:<10}  {:>5}  {:>12}  {}\n",
            budget.name(),
            format_date(budget.date(), settings),
            budget.item_count(),
            money(budget.balance(), settings),
            budget.id(),
            name_width = name_width,
        ));
    }

    output
}

fn format_item_row(position: usize, item: &BudgetItem, settings: &Settings) -> String {
    let check = if item.is_completed() { "x" } else { " " };
    format!(
        "  {:>3}. [{}] {:<28} {:>12}\n",
        position,
        check,
        item.category(),
        money(item.amount(), settings)
    )
}

/// Format a full budget summary: both lists, totals and outstanding amounts
pub fn format_budget_summary(budget: &Budget, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Budget: {}\n", budget.name()));
    output.push_str(&format!("  ID:      {}\n", budget.id()));
    output.push_str(&format!(
        "  Created: {}\n",
        format_date(budget.date(), settings)
    ));

    for kind in ItemKind::all() {
        output.push_str(&format!("\n{}\n", kind.heading()));

        let items = budget.items(kind);
        if items.is_empty() {
            output.push_str("  (no items)\n");
        }
        for (i, item) in items.iter().enumerate() {
            output.push_str(&format_item_row(i + 1, item, settings));
        }
    }

    let totals = budget.totals();
    let row = |label: &str, amount: Money| format!("  {:<34} {:>12}\n", label, money(amount, settings));

    output.push_str(&format!("\n{}\n", "=".repeat(49)));
    output.push_str(&row("Total income", totals.total_income));
    output.push_str(&row("Total expenses", totals.total_expenses));
    output.push_str(&row("Balance", totals.balance));

    output.push_str("\nOutstanding\n");
    output.push_str(&row("Income", totals.outstanding_income));
    output.push_str(&row("Expenses", totals.outstanding_expenses));
    output.push_str(&row("Balance", totals.outstanding_balance));

    output
}
