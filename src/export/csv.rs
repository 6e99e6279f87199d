//! CSV export
//!
//! Any record exposing named fields can be written. The header row is the
//! header list joined with commas; each header is looked up on the record in
//! lowercase and every value is quoted.

use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::{FinboardError, FinboardResult};
use crate::models::Transaction;
use crate::services::{BudgetComparison, CategoryTotals, TimeBucketTotals};

/// Headers for a transaction export
pub const TRANSACTION_HEADERS: [&str; 5] = ["Description", "Amount", "Type", "Category", "Date"];

/// Headers for a trend (time bucket) export
pub const TREND_HEADERS: [&str; 3] = ["key", "income", "expense"];

/// Headers for a budget-vs-actual export
pub const BUDGET_HEADERS: [&str; 3] = ["key", "budget", "actual"];

/// Headers for a per-category export
pub const CATEGORY_HEADERS: [&str; 3] = ["category", "income", "expense"];

/// A record that can be written as a CSV row
pub trait CsvRecord {
    /// Value of a lowercase field name, or `None` if the record has no such field
    fn field(&self, name: &str) -> Option<String>;
}

impl CsvRecord for Transaction {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.to_string()),
            "description" => Some(self.description.clone()),
            "amount" => Some(self.amount.to_string()),
            "type" => Some(self.kind.to_string()),
            "category" => Some(self.category.clone()),
            "date" => Some(self.date.to_string()),
            _ => None,
        }
    }
}

impl CsvRecord for TimeBucketTotals {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "key" => Some(self.key.clone()),
            "income" => Some(self.income.to_string()),
            "expense" => Some(self.expense.to_string()),
            _ => None,
        }
    }
}

impl CsvRecord for CategoryTotals {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "key" | "category" => Some(self.category.clone()),
            "income" => Some(self.income.to_string()),
            "expense" => Some(self.expense.to_string()),
            _ => None,
        }
    }
}

impl CsvRecord for BudgetComparison {
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "key" | "category" => Some(self.category.clone()),
            "budget" => Some(self.budget.to_string()),
            "actual" => Some(self.actual.to_string()),
            _ => None,
        }
    }
}

/// Render records as CSV text
///
/// Returns an empty string when there are no records. Rows are separated by
/// `\n` with no trailing newline.
pub fn to_csv<R: CsvRecord>(records: &[R], headers: &[&str]) -> FinboardResult<String> {
    if records.is_empty() {
        return Ok(String::new());
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let keys: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
    for record in records {
        let row = keys
            .iter()
            .map(|key| record.field(key).unwrap_or_default());
        writer.write_record(row)?;
    }

    let body = writer
        .into_inner()
        .map_err(|e| FinboardError::Export(format!("Failed to finish CSV: {}", e)))?;
    let body = String::from_utf8(body)
        .map_err(|e| FinboardError::Export(format!("CSV is not valid UTF-8: {}", e)))?;

    let mut out = headers.join(",");
    out.push('\n');
    out.push_str(body.trim_end_matches('\n'));
    Ok(out)
}

/// Write records as CSV to any writer
pub fn write_csv<W: Write, R: CsvRecord>(
    writer: &mut W,
    records: &[R],
    headers: &[&str],
) -> FinboardResult<()> {
    let text = to_csv(records, headers)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| FinboardError::Export(e.to_string()))
}
