//! Metrics engine
//!
//! Scalar summaries over a transaction snapshot: totals, average daily
//! expense, the top spending category and the month-over-month trend.
//! Every ratio guards its denominator and falls back to a defined value.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use super::aggregation::effective_date;
use crate::models::{Money, Transaction, TransactionType};

/// Headline figures of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total_income: Money,
    pub total_expense: Money,
    pub balance: Money,
}

impl DashboardSummary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let total_income = total_by_type(transactions, &TransactionType::Income);
        let total_expense = total_by_type(transactions, &TransactionType::Expense);
        Self {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        }
    }
}

/// Sum of the amounts of transactions of one type
pub fn total_by_type(transactions: &[Transaction], kind: &TransactionType) -> Money {
    transactions
        .iter()
        .filter(|t| &t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

/// Total expense divided by the number of distinct days with an expense
///
/// Zero when there are no expenses. Rounded to the cent.
pub fn average_daily_expense(transactions: &[Transaction]) -> Money {
    let expenses: Vec<&Transaction> = transactions.iter().filter(|t| t.is_expense()).collect();
    let days: HashSet<NaiveDate> = expenses.iter().map(|t| effective_date(t)).collect();

    if days.is_empty() {
        return Money::zero();
    }

    let total: Money = expenses.iter().map(|t| t.amount).sum();
    total.div_round(days.len() as i64)
}

/// A category with its summed amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySpend {
    pub category: String,
    pub amount: Money,
}

/// The category with the highest summed expense
///
/// Ties go to the category whose first expense appears earliest; income
/// records play no part in the ordering. Returns `None` when no category has
/// a positive expense total.
pub fn highest_spending_category(transactions: &[Transaction]) -> Option<CategorySpend> {
    let mut expenses: Vec<(&str, Money)> = Vec::new();
    for txn in transactions
        .iter()
        .filter(|t| t.kind == TransactionType::Expense)
    {
        match expenses.iter_mut().find(|(c, _)| *c == txn.category) {
            Some((_, sum)) => *sum += txn.amount,
            None => expenses.push((txn.category.as_str(), txn.amount)),
        }
    }

    let mut best: Option<CategorySpend> = None;
    for (category, amount) in expenses {
        let current_max = best.as_ref().map(|b| b.amount).unwrap_or_default();
        if amount > current_max {
            best = Some(CategorySpend {
                category: category.to_string(),
                amount,
            });
        }
    }

    best
}

/// Direction of the month-over-month expense change
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrendChange {
    /// Nothing was spent in the previous month
    FirstPeriod,
    Increase { percent: f64 },
    Decrease { percent: f64 },
    Unchanged,
}

/// Expense comparison between a month and the one before it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTrend {
    /// Year and month of the reference date
    pub year: i32,
    pub month: u32,
    pub current_total: Money,
    pub previous_total: Money,
    pub change: TrendChange,
}

/// Compare total expense in the month of `reference` with the previous month
///
/// January is compared with December of the prior year.
pub fn month_over_month_delta(transactions: &[Transaction], reference: NaiveDate) -> MonthTrend {
    let (year, month) = (reference.year(), reference.month());
    let (prev_year, prev_month) = previous_month(year, month);

    let mut current_total = Money::zero();
    let mut previous_total = Money::zero();

    for txn in transactions.iter().filter(|t| t.is_expense()) {
        let date = effective_date(txn);
        let ym = (date.year(), date.month());
        if ym == (year, month) {
            current_total += txn.amount;
        } else if ym == (prev_year, prev_month) {
            previous_total += txn.amount;
        }
    }

    let change = if previous_total.is_zero() {
        TrendChange::FirstPeriod
    } else {
        let delta = current_total - previous_total;
        let percent = delta.abs().percent_of(previous_total.abs());
        if delta.is_positive() {
            TrendChange::Increase { percent }
        } else if delta.is_negative() {
            TrendChange::Decrease { percent }
        } else {
            TrendChange::Unchanged
        }
    };

    MonthTrend {
        year,
        month,
        current_total,
        previous_total,
        change,
    }
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

impl fmt::Display for TrendChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstPeriod => {
                write!(f, "This is your first month recording expenses. Keep it up!")
            }
            Self::Increase { percent } => write!(
                f,
                "Your expenses have increased by {:.2}%. Consider reviewing your spending.",
                percent
            ),
            Self::Decrease { percent } => write!(
                f,
                "Great job! You've reduced your expenses by {:.2}%.",
                percent
            ),
            Self::Unchanged => write!(f, "Your expenses have remained the same as last month."),
        }
    }
}

impl fmt::Display for MonthTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionDate, TransactionId};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(kind: &str, cents: i64, category: &str, date: &str) -> Transaction {
        Transaction {
            id: TransactionId::from_raw(0),
            description: String::new(),
            amount: Money::from_cents(cents),
            kind: TransactionType::from(kind),
            category: category.to_string(),
            date: TransactionDate::parse(date),
        }
    }

    #[test]
    fn test_totals_by_type_do_not_double_count() {
        let txns = vec![
            txn("income", 230000, "Salary", "2024-10-27"),
            txn("expense", 11000, "Clothing", "2024-10-21"),
            txn("expense", 5000, "Health", "2024-10-24"),
            txn("refund", 700, "Clothing", "2024-10-25"),
        ];

        let income = total_by_type(&txns, &TransactionType::Income);
        let expense = total_by_type(&txns, &TransactionType::Expense);
        assert_eq!(income.cents(), 230000);
        assert_eq!(expense.cents(), 16000);

        let typed: Money = txns
            .iter()
            .filter(|t| t.is_income() || t.is_expense())
            .map(|t| t.amount)
            .sum();
        assert_eq!(income + expense, typed);
    }

    #[test]
    fn test_total_by_type_empty() {
        assert_eq!(total_by_type(&[], &TransactionType::Income), Money::zero());
    }

    #[test]
    fn test_dashboard_summary() {
        let txns = vec![
            txn("income", 30000, "Salary", "2024-01-01"),
            txn("expense", 45000, "Housing", "2024-01-02"),
        ];
        let summary = DashboardSummary::from_transactions(&txns);
        assert_eq!(summary.total_income.cents(), 30000);
        assert_eq!(summary.total_expense.cents(), 45000);
        assert_eq!(summary.balance.cents(), -15000);
    }

    #[test]
    fn test_average_daily_expense_distinct_dates() {
        let txns = vec![
            txn("expense", 5000, "Food", "2023-10-01"),
            txn("expense", 10000, "Food", "2023-10-02"),
        ];
        let avg = average_daily_expense(&txns);
        assert_eq!(avg.cents(), 7500);
        assert_eq!(avg.to_string(), "75.00");
    }

    #[test]
    fn test_average_daily_expense_same_date() {
        let txns = vec![
            txn("expense", 5000, "Food", "2023-10-01"),
            txn("expense", 10000, "Transport", "2023-10-01"),
        ];
        assert_eq!(average_daily_expense(&txns).cents(), 15000);

        let top = highest_spending_category(&txns).unwrap();
        assert_eq!(top.category, "Transport");
        assert_eq!(top.amount.cents(), 10000);
    }

    #[test]
    fn test_average_daily_expense_no_expenses() {
        assert_eq!(average_daily_expense(&[]), Money::zero());
        let only_income = vec![txn("income", 100, "Salary", "2024-01-01")];
        assert_eq!(average_daily_expense(&only_income), Money::zero());
    }

    #[test]
    fn test_average_ignores_income_days() {
        let txns = vec![
            txn("expense", 9000, "Food", "2024-01-01"),
            txn("income", 100000, "Salary", "2024-01-02"),
        ];
        assert_eq!(average_daily_expense(&txns).cents(), 9000);
    }

    #[test]
    fn test_highest_spending_category_empty() {
        assert_eq!(highest_spending_category(&[]), None);
        let only_income = vec![txn("income", 100, "Salary", "2024-01-01")];
        assert_eq!(highest_spending_category(&only_income), None);
    }

    #[test]
    fn test_highest_spending_category_tie_goes_to_first() {
        let txns = vec![
            txn("expense", 3000, "Travel", "2024-01-01"),
            txn("expense", 1000, "Food", "2024-01-02"),
            txn("expense", 2000, "Food", "2024-01-03"),
        ];
        let top = highest_spending_category(&txns).unwrap();
        assert_eq!(top.category, "Travel");
        assert_eq!(top.amount.cents(), 3000);
    }

    #[test]
    fn test_highest_spending_category_tie_ignores_income_order() {
        let txns = vec![
            txn("income", 500, "B", "2024-01-01"),
            txn("expense", 1000, "A", "2024-01-02"),
            txn("expense", 1000, "B", "2024-01-03"),
        ];
        let top = highest_spending_category(&txns).unwrap();
        assert_eq!(top.category, "A");
        assert_eq!(top.amount.cents(), 1000);
    }

    #[test]
    fn test_highest_spending_category_sums_per_category() {
        let txns = vec![
            txn("expense", 3000, "Travel", "2024-01-01"),
            txn("expense", 2000, "Food", "2024-01-02"),
            txn("expense", 2000, "Food", "2024-01-03"),
        ];
        assert_eq!(highest_spending_category(&txns).unwrap().category, "Food");
    }

    #[test]
    fn test_highest_spending_category_skips_non_positive() {
        let txns = vec![txn("expense", -500, "Refunds", "2024-01-01")];
        assert_eq!(highest_spending_category(&txns), None);
    }

    #[test]
    fn test_month_over_month_first_period() {
        let txns = vec![txn("expense", 5000, "Food", "2024-10-05")];
        let trend = month_over_month_delta(&txns, ymd(2024, 10, 20));
        assert_eq!(trend.change, TrendChange::FirstPeriod);
        assert_eq!(trend.current_total.cents(), 5000);
        assert_eq!(
            trend.to_string(),
            "This is your first month recording expenses. Keep it up!"
        );
    }

    #[test]
    fn test_month_over_month_increase_and_decrease() {
        let txns = vec![
            txn("expense", 10000, "Food", "2024-09-10"),
            txn("expense", 15000, "Food", "2024-10-10"),
            txn("income", 99900, "Salary", "2024-10-01"),
        ];
        let trend = month_over_month_delta(&txns, ymd(2024, 10, 31));
        assert_eq!(trend.change, TrendChange::Increase { percent: 50.0 });
        assert_eq!(
            trend.to_string(),
            "Your expenses have increased by 50.00%. Consider reviewing your spending."
        );

        let txns = vec![
            txn("expense", 20000, "Food", "2024-09-10"),
            txn("expense", 15000, "Food", "2024-10-10"),
        ];
        let trend = month_over_month_delta(&txns, ymd(2024, 10, 1));
        assert_eq!(trend.change, TrendChange::Decrease { percent: 25.0 });
        assert_eq!(
            trend.to_string(),
            "Great job! You've reduced your expenses by 25.00%."
        );
    }

    #[test]
    fn test_month_over_month_unchanged() {
        let txns = vec![
            txn("expense", 4200, "Food", "2024-09-10"),
            txn("expense", 4200, "Food", "2024-10-10"),
        ];
        let trend = month_over_month_delta(&txns, ymd(2024, 10, 15));
        assert_eq!(trend.change, TrendChange::Unchanged);
    }

    #[test]
    fn test_month_over_month_rolls_over_year() {
        let txns = vec![
            txn("expense", 10000, "Food", "2023-12-24"),
            txn("expense", 5000, "Food", "2024-01-03"),
            txn("expense", 99900, "Food", "2023-01-15"),
        ];
        let trend = month_over_month_delta(&txns, ymd(2024, 1, 20));
        assert_eq!(trend.previous_total.cents(), 10000);
        assert_eq!(trend.current_total.cents(), 5000);
        assert_eq!(trend.change, TrendChange::Decrease { percent: 50.0 });
    }

    #[test]
    fn test_current_month_without_expenses_is_full_decrease() {
        let txns = vec![txn("expense", 10000, "Food", "2024-02-10")];
        let trend = month_over_month_delta(&txns, ymd(2024, 3, 1));
        assert_eq!(trend.change, TrendChange::Decrease { percent: 100.0 });
    }
}
