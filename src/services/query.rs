//! Transaction list queries
//!
//! Filtering, ordering and pagination used when listing transactions. These
//! never mutate the input and never fail.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use crate::models::{Transaction, TransactionType};

/// Ordering applied to a transaction listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Largest amount first
    Amount,
    /// Newest first
    Date,
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount => write!(f, "amount"),
            Self::Date => write!(f, "date"),
        }
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "amount" => Ok(Self::Amount),
            "date" => Ok(Self::Date),
            other => Err(format!("Unknown sort order '{}': use amount or date", other)),
        }
    }
}

/// Criteria for listing transactions
///
/// Category matching is exact. Without a sort order, stored order is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFilter {
    pub category: Option<String>,
    pub kind: Option<TransactionType>,
    pub sort_by: Option<SortBy>,
    /// 1-based page number
    pub page: usize,
    pub rows_per_page: usize,
}

impl Default for TransactionFilter {
    fn default() -> Self {
        Self {
            category: None,
            kind: None,
            sort_by: None,
            page: 1,
            rows_per_page: 10,
        }
    }
}

/// One page of a filtered listing
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub items: Vec<&'a Transaction>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    pub fn page(mut self, page: usize, rows_per_page: usize) -> Self {
        self.page = page;
        self.rows_per_page = rows_per_page;
        self
    }

    /// Whether a single transaction passes the category and type filters
    pub fn matches(&self, txn: &Transaction) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .map_or(true, |c| txn.category == c);
        let kind_ok = self.kind.as_ref().map_or(true, |k| &txn.kind == k);
        category_ok && kind_ok
    }

    /// Filter and order without paginating
    pub fn select<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        let mut selected: Vec<&Transaction> =
            transactions.iter().filter(|t| self.matches(t)).collect();

        match self.sort_by {
            Some(SortBy::Amount) => selected.sort_by_key(|t| Reverse(t.amount)),
            Some(SortBy::Date) => selected.sort_by_key(|t| Reverse(t.date.effective())),
            None => {}
        }

        selected
    }

    /// Filter, order and cut out the requested page
    ///
    /// A page past the end yields no items. `rows_per_page` of zero is
    /// treated as one row per page.
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Page<'a> {
        let selected = self.select(transactions);
        let rows = self.rows_per_page.max(1);
        let page = self.page.max(1);
        let total_items = selected.len();
        let total_pages = total_items.div_ceil(rows);

        let items = selected
            .into_iter()
            .skip((page - 1).saturating_mul(rows))
            .take(rows)
            .collect();

        Page {
            items,
            page,
            total_pages,
            total_items,
        }
    }
}

/// The newest `limit` transactions, newest first
pub fn recent(transactions: &[Transaction], limit: usize) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|t| Reverse(t.date.effective()));
    sorted.truncate(limit);
    sorted
}

/// Distinct categories in first-appearance order
pub fn unique_categories(transactions: &[Transaction]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for txn in transactions {
        if !seen.contains(&txn.category.as_str()) {
            seen.push(txn.category.as_str());
        }
    }
    seen
}
