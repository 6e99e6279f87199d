//! Aggregation engine
//!
//! Pure functions that group a snapshot of transactions along one dimension
//! (time bucket, category) and reduce each group to income/expense subtotals.
//! Output order is always defined here, never by hash iteration order.
//!
//! Dates that failed to parse are ordered and bucketed as `1970-01-01`.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::models::{Money, Transaction, TransactionDate, TransactionType};

/// Time granularity for trend grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeBucket {
    Daily,
    /// Week index within the month: `ceil(day_of_month / 7)`, so 1..=5.
    /// Not an ISO week; the index restarts every month and weeks of
    /// different months in the same year share a key.
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl TimeBucket {
    /// The bucket key a date falls into
    ///
    /// - daily: `YYYY-MM-DD`
    /// - weekly: `YYYY-W<n>`
    /// - monthly: `YYYY-MM`
    /// - yearly: `YYYY`
    pub fn key(&self, date: NaiveDate) -> String {
        match self {
            Self::Daily => date.format("%Y-%m-%d").to_string(),
            Self::Weekly => format!("{}-W{}", date.year(), week_of_month(date)),
            Self::Monthly => format!("{}-{:02}", date.year(), date.month()),
            Self::Yearly => date.year().to_string(),
        }
    }

    /// The date implied by the key of `date`, used to order buckets
    ///
    /// Weekly keys only carry a year and a week index, so they map onto
    /// January of that year: week `n` anchors at January `1 + 7(n-1)`.
    pub fn anchor(&self, date: NaiveDate) -> NaiveDate {
        let anchor = match self {
            Self::Daily => Some(date),
            Self::Weekly => NaiveDate::from_ymd_opt(date.year(), 1, 1 + 7 * (week_of_month(date) - 1)),
            Self::Monthly => NaiveDate::from_ymd_opt(date.year(), date.month(), 1),
            Self::Yearly => NaiveDate::from_ymd_opt(date.year(), 1, 1),
        };
        anchor.unwrap_or(date)
    }
}

fn week_of_month(date: NaiveDate) -> u32 {
    (date.day() + 6) / 7
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        };
        f.write_str(name)
    }
}

impl FromStr for TimeBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" => Ok(Self::Daily),
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            "yearly" | "year" => Ok(Self::Yearly),
            other => Err(format!(
                "unknown time bucket '{}' (expected daily, weekly, monthly or yearly)",
                other
            )),
        }
    }
}

/// Income and expense subtotals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub income: Money,
    pub expense: Money,
}

impl Totals {
    /// Add a transaction to the side matching its type
    ///
    /// Unrecognized types are ignored.
    pub fn add(&mut self, txn: &Transaction) {
        match txn.kind {
            TransactionType::Income => self.income += txn.amount,
            TransactionType::Expense => self.expense += txn.amount,
            TransactionType::Other(_) => {}
        }
    }
}

/// Subtotals for one time bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeBucketTotals {
    pub key: String,
    pub income: Money,
    pub expense: Money,
}

/// Subtotals for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotals {
    pub category: String,
    pub income: Money,
    pub expense: Money,
}

/// Running balance after one transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalancePoint {
    pub date: TransactionDate,
    pub balance: Money,
}

/// Configured limit against actual spending for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetComparison {
    pub category: String,
    pub budget: Money,
    pub actual: Money,
}

impl BudgetComparison {
    /// Budget left (negative when overspent)
    pub fn remaining(&self) -> Money {
        self.budget - self.actual
    }

    /// Spending as a percentage of the budget; 0 for a zero budget
    pub fn percent_used(&self) -> f64 {
        self.actual.percent_of(self.budget)
    }
}

/// The date a transaction is ordered and bucketed by
pub(crate) fn effective_date(txn: &Transaction) -> NaiveDate {
    match &txn.date {
        TransactionDate::Valid(date) => *date,
        TransactionDate::Invalid(raw) => {
            warn!(id = %txn.id, date = %raw, "Unparseable transaction date, using epoch");
            TransactionDate::epoch()
        }
    }
}

/// Group transactions by time bucket
///
/// Buckets are sorted ascending by the date their key implies.
pub fn group_by_time(transactions: &[Transaction], bucket: TimeBucket) -> Vec<TimeBucketTotals> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(NaiveDate, String, Totals)> = Vec::new();

    for txn in transactions {
        let date = effective_date(txn);
        let key = bucket.key(date);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push((bucket.anchor(date), key, Totals::default()));
            groups.len() - 1
        });
        groups[slot].2.add(txn);
    }

    groups.sort_by_key(|(anchor, _, _)| *anchor);

    groups
        .into_iter()
        .map(|(_, key, totals)| TimeBucketTotals {
            key,
            income: totals.income,
            expense: totals.expense,
        })
        .collect()
}

/// Group transactions by category, in order of first appearance
pub fn group_by_category(transactions: &[Transaction]) -> Vec<CategoryTotals> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<CategoryTotals> = Vec::new();

    for txn in transactions {
        let slot = *index.entry(txn.category.as_str()).or_insert_with(|| {
            groups.push(CategoryTotals {
                category: txn.category.clone(),
                income: Money::zero(),
                expense: Money::zero(),
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        match txn.kind {
            TransactionType::Income => group.income += txn.amount,
            TransactionType::Expense => group.expense += txn.amount,
            TransactionType::Other(_) => {}
        }
    }

    groups
}

/// Expense total per category
pub fn category_actuals(transactions: &[Transaction]) -> BTreeMap<String, Money> {
    let mut actuals = BTreeMap::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        *actuals.entry(txn.category.clone()).or_insert_with(Money::zero) += txn.amount;
    }
    actuals
}

/// Running balance over transactions sorted by date
///
/// One point per transaction (no de-duplication by date). Transactions on the
/// same date keep their input order.
pub fn cumulative_balance(transactions: &[Transaction]) -> Vec<BalancePoint> {
    let mut sorted: Vec<(NaiveDate, &Transaction)> =
        transactions.iter().map(|t| (effective_date(t), t)).collect();
    sorted.sort_by_key(|(date, _)| *date);

    let mut balance = Money::zero();
    sorted
        .into_iter()
        .map(|(_, txn)| {
            match txn.kind {
                TransactionType::Income => balance += txn.amount,
                TransactionType::Expense => balance -= txn.amount,
                TransactionType::Other(_) => {}
            }
            BalancePoint {
                date: txn.date.clone(),
                balance,
            }
        })
        .collect()
}

/// Compare configured category limits with actual spending
///
/// One record per configured limit, in the order of `category_limits`.
/// Categories without a limit are left out.
pub fn budget_vs_actual(
    transactions: &[Transaction],
    category_limits: &BTreeMap<String, Money>,
) -> Vec<BudgetComparison> {
    let actuals = category_actuals(transactions);

    category_limits
        .iter()
        .map(|(category, budget)| BudgetComparison {
            category: category.clone(),
            budget: *budget,
            actual: actuals.get(category).copied().unwrap_or_default(),
        })
        .collect()
}
