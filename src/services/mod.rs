//! Service layer for finboard
//!
//! The analytics pipeline: aggregation of transactions into time buckets and
//! categories, scalar dashboard metrics, the budget evaluator, and listing
//! queries. Everything here is a pure function of its inputs.

pub mod aggregation;
pub mod budget;
pub mod metrics;
pub mod query;

pub use aggregation::{
    budget_vs_actual, category_actuals, cumulative_balance, group_by_category, group_by_time,
    BalancePoint, BudgetComparison, CategoryTotals, TimeBucket, TimeBucketTotals, Totals,
};
pub use budget::{
    evaluate_balance, evaluate_category_budgets, evaluate_total_budget, Alert, BudgetAlerts,
};
pub use metrics::{
    average_daily_expense, highest_spending_category, month_over_month_delta, total_by_type,
    CategorySpend, DashboardSummary, MonthTrend, TrendChange,
};
pub use query::{recent, unique_categories, Page, SortBy, TransactionFilter};
