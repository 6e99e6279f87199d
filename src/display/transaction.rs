//! Transaction display formatting

use std::fmt::Write;

use crate::models::{Transaction, TransactionDate};
use crate::services::Page;

use super::report::truncate;

/// Render a date with a strftime pattern
///
/// Unparsed dates are shown as entered. A pattern chrono rejects falls back to
/// the canonical form.
pub fn format_date(date: &TransactionDate, pattern: &str) -> String {
    match date.as_date() {
        Some(d) => {
            let mut out = String::new();
            if write!(out, "{}", d.format(pattern)).is_err() {
                return date.to_string();
            }
            out
        }
        None => date.to_string(),
    }
}

/// Format a single transaction as a list row
pub fn format_transaction_row(txn: &Transaction, date_format: &str) -> String {
    let sign = if txn.is_expense() { "-" } else { "+" };
    format!(
        "{:>15} {:10} {:24} {:18} {}{:>11}",
        txn.id,
        format_date(&txn.date, date_format),
        truncate(&txn.description, 24),
        truncate(&txn.category, 18),
        sign,
        txn.amount
    )
}

fn header() -> String {
    let mut output = format!(
        "{:>15} {:10} {:24} {:18} {:>12}\n",
        "ID", "Date", "Description", "Category", "Amount"
    );
    output.push_str(&"-".repeat(83));
    output.push('\n');
    output
}

/// Format a list of transactions
pub fn format_transaction_list(transactions: &[&Transaction], date_format: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = header();
    for txn in transactions {
        output.push_str(&format_transaction_row(txn, date_format));
        output.push('\n');
    }
    output
}

/// Format one page of a filtered listing with its position
pub fn format_transaction_page(page: &Page<'_>, date_format: &str) -> String {
    if page.total_items == 0 {
        return "No transactions found.\n".to_string();
    }

    let mut output = format_transaction_list(&page.items, date_format);
    output.push_str(&format!(
        "\nPage {} of {} ({} transactions)\n",
        page.page, page.total_pages, page.total_items
    ));
    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date));
    if !txn.date.is_valid() {
        output.push_str("             (unrecognized date, treated as 1970-01-01)\n");
    }
    output.push_str(&format!("Description: {}\n", txn.description));
    output.push_str(&format!("Amount:      {}\n", txn.amount));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Category:    {}\n", txn.category));

    output
}
