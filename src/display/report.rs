//! Report formatting for terminal output
//!
//! Plain-text renderings of the dashboard summary, the time series, the
//! category breakdown, the running balance and the scalar stats.

use crate::models::Money;
use crate::services::{
    BalancePoint, CategorySpend, CategoryTotals, DashboardSummary, MonthTrend, TimeBucket,
    TimeBucketTotals,
};

const WIDTH: usize = 60;

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

fn title(output: &mut String, text: &str) {
    output.push_str(text);
    output.push('\n');
    output.push_str(&"=".repeat(WIDTH));
    output.push('\n');
}

/// Headline figures
pub fn format_summary(summary: &DashboardSummary, symbol: &str) -> String {
    let mut output = String::new();
    title(&mut output, "Dashboard Summary");
    output.push_str(&format!(
        "{:<20} {:>16}\n",
        "Total Income:",
        summary.total_income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "{:<20} {:>16}\n",
        "Total Expenses:",
        summary.total_expense.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "{:<20} {:>16}\n",
        "Balance:",
        summary.balance.format_with_symbol(symbol)
    ));
    output
}

fn max_cents<'a>(values: impl Iterator<Item = &'a Money>) -> f64 {
    values.map(|m| m.cents()).max().unwrap_or(0) as f64
}

/// Income and expense per time bucket
pub fn format_trend(rows: &[TimeBucketTotals], bucket: TimeBucket) -> String {
    let mut output = String::new();
    title(&mut output, &format!("Income vs Expenses ({})", bucket));

    if rows.is_empty() {
        output.push_str("No transactions recorded.\n");
        return output;
    }

    let max = max_cents(rows.iter().flat_map(|r| [&r.income, &r.expense]));

    output.push_str(&format!(
        "{:<12} {:>12} {:>12}  {}\n",
        "Period", "Income", "Expense", "Expense share"
    ));
    output.push_str(&"-".repeat(WIDTH));
    output.push('\n');
    for row in rows {
        output.push_str(&format!(
            "{:<12} {:>12} {:>12}  {}\n",
            row.key,
            row.income,
            row.expense,
            format_bar(row.expense.cents() as f64, max, 20)
        ));
    }
    output
}

/// Per-category totals with each category's share of spending
pub fn format_categories(rows: &[CategoryTotals]) -> String {
    let mut output = String::new();
    title(&mut output, "Spending by Category");

    if rows.is_empty() {
        output.push_str("No transactions recorded.\n");
        return output;
    }

    let total_expense: Money = rows.iter().map(|r| r.expense).sum();

    output.push_str(&format!(
        "{:<22} {:>12} {:>12} {:>8}\n",
        "Category", "Income", "Expense", "%"
    ));
    output.push_str(&"-".repeat(WIDTH));
    output.push('\n');
    for row in rows {
        output.push_str(&format!(
            "{:<22} {:>12} {:>12} {:>7.1}%\n",
            truncate(&row.category, 22),
            row.income,
            row.expense,
            row.expense.percent_of(total_expense)
        ));
    }
    output
}

/// Balance after each transaction in date order
pub fn format_balance(points: &[BalancePoint]) -> String {
    let mut output = String::new();
    title(&mut output, "Balance Over Time");

    if points.is_empty() {
        output.push_str("No transactions recorded.\n");
        return output;
    }

    for point in points {
        output.push_str(&format!("{:<12} {:>14}\n", point.date.to_string(), point.balance));
    }
    output
}

/// Average daily expense, top category and the month trend
pub fn format_stats(
    average_daily: Money,
    highest: Option<&CategorySpend>,
    trend: &MonthTrend,
    symbol: &str,
) -> String {
    let mut output = String::new();
    title(&mut output, "Statistics");

    output.push_str(&format!(
        "Average Daily Expense:     {}\n",
        average_daily.format_with_symbol(symbol)
    ));

    match highest {
        Some(top) => output.push_str(&format!(
            "Highest Spending Category: {} ({})\n",
            top.category,
            top.amount.format_with_symbol(symbol)
        )),
        None => output.push_str("Highest Spending Category: none\n"),
    }

    output.push_str(&format!(
        "\n{:04}-{:02}: {} this month, {} last month\n",
        trend.year,
        trend.month,
        trend.current_total.format_with_symbol(symbol),
        trend.previous_total.format_with_symbol(symbol)
    ));
    output.push_str(&format!("{}\n", trend));
    output
}
