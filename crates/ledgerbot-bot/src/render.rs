//! Message bodies and keyboards sent back to users

use ledgerbot_core::{format_amount, LedgerEntry, Report};
use rust_decimal::Decimal;

use crate::transport::Button;

// Reply-keyboard shortcut labels, accepted as commands.
pub const LABEL_NEW: &str = "New entry";
pub const LABEL_EDIT: &str = "Edit entry";
pub const LABEL_DELETE: &str = "Delete entry";
pub const LABEL_REPORT: &str = "Report";
pub const LABEL_ADD_CATEGORY: &str = "Add category";
pub const LABEL_DEL_CATEGORY: &str = "Delete category";

pub fn main_menu() -> String {
    [
        "What would you like to do?",
        "",
        "/new - record an expense or income",
        "/edit - change one of your last entries",
        "/delete - remove one of your last entries",
        "/report - expense report for a period",
        "/categories - list categories",
        "/addcategory - create a category",
        "/delcategory - remove a category",
        "/cancel - abort the current operation",
        "/help - this menu",
    ]
    .join("\n")
}

pub fn help_text() -> String {
    format!(
        "I keep a shared ledger of expenses and income.\n\
         Amounts accept both 12.50 and 12,50.\n\
         Reports cover expenses only, per week, fortnight or month.\n\n{}",
        main_menu()
    )
}

/// One-line label used on entry-selection buttons
pub fn entry_label(entry: &LedgerEntry) -> String {
    format!(
        "#{} | {} | {} | {}",
        entry.id,
        entry.timestamp,
        format_amount(entry.amount),
        entry.category
    )
}

/// Multi-line summary of one entry
pub fn entry_summary(entry: &LedgerEntry) -> String {
    format!(
        "Entry #{}\nDate: {}\nKind: {}\nAmount: {}\nCategory: {}\nDescription: {}",
        entry.id,
        entry.timestamp,
        entry.kind,
        format_amount(entry.amount),
        entry.category,
        or_dash(&entry.description)
    )
}

/// Before/after comparison shown on edit confirmation
pub fn edit_diff(
    original: &LedgerEntry,
    amount: Decimal,
    category: &str,
    description: &str,
) -> String {
    format!(
        "Update entry #{}?\nAmount: {} -> {}\nCategory: {} -> {}\nDescription: {} -> {}",
        original.id,
        format_amount(original.amount),
        format_amount(amount),
        original.category,
        category,
        or_dash(&original.description),
        or_dash(description)
    )
}

pub fn category_list(names: &[String]) -> String {
    if names.is_empty() {
        return "There are no categories yet. Use /addcategory to create one.".to_string();
    }
    let mut out = String::from("Categories:");
    for name in names {
        out.push_str("\n- ");
        out.push_str(name);
    }
    out
}

pub fn render_report(report: &Report) -> String {
    let mut out = format!(
        "{} expense report\nPeriod: {}\n",
        report.period,
        report.window.describe()
    );
    if report.per_category.is_empty() {
        out.push_str("No expenses recorded in this period.");
        return out;
    }
    out.push_str(&format!(
        "Total expenses: {}\n\nBy category:",
        format_amount(report.grand_total)
    ));
    for (category, total) in &report.per_category {
        out.push_str(&format!("\n- {}: {}", category, format_amount(*total)));
    }
    out.push_str("\n\nBy user:");
    for (user, total) in &report.per_user {
        out.push_str(&format!("\n- {}: {}", user, format_amount(*total)));
    }
    out
}

/// Arrange category buttons three per row, token = name
pub fn category_rows(names: &[String]) -> Vec<Vec<Button>> {
    names
        .chunks(3)
        .map(|chunk| {
            chunk
                .iter()
                .map(|name| Button::new(name.clone(), name.clone()))
                .collect()
        })
        .collect()
}

/// The yes/no confirmation row
pub fn confirm_row() -> Vec<Vec<Button>> {
    vec![vec![Button::new("Yes", "yes"), Button::new("No", "no")]]
}

fn or_dash(text: &str) -> &str {
    if text.is_empty() {
        "-"
    } else {
        text
    }
}
