//! Budget evaluator
//!
//! Decides alert state from actual spending and the configured limits. The
//! checks are pure and always computed; whether the resulting alerts are
//! shown is decided by [`BudgetAlerts::surface`] from `alerts_enabled`.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::aggregation::category_actuals;
use super::metrics::DashboardSummary;
use crate::models::{BudgetSettings, Money, Transaction};

/// Whether total spending went over the total limit
pub fn evaluate_total_budget(total_expense: Money, total_budget_limit: Money) -> bool {
    total_expense > total_budget_limit
}

/// Categories whose spending is strictly above their limit
///
/// Spending exactly at the limit is not exceeded. Categories without a limit
/// are never reported.
pub fn evaluate_category_budgets(
    category_actuals: &BTreeMap<String, Money>,
    category_limits: &BTreeMap<String, Money>,
) -> BTreeSet<String> {
    category_actuals
        .iter()
        .filter(|(category, actual)| {
            category_limits
                .get(category.as_str())
                .is_some_and(|limit| *actual > limit)
        })
        .map(|(category, _)| category.clone())
        .collect()
}

/// Whether the balance is below zero (a zero balance is not negative)
pub fn evaluate_balance(total_income: Money, total_expense: Money) -> bool {
    (total_income - total_expense).is_negative()
}

/// An alert ready to be shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Alert {
    TotalBudgetExceeded { limit: Money, spent: Money },
    CategoryBudgetExceeded { category: String, limit: Money, spent: Money },
    NegativeBalance { balance: Money },
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TotalBudgetExceeded { limit, .. } => {
                write!(f, "You have exceeded your total budget limit of {}!", limit)
            }
            Self::CategoryBudgetExceeded {
                category,
                limit,
                spent,
            } => write!(
                f,
                "You have exceeded your budget for {}: spent {} of {}.",
                category, spent, limit
            ),
            Self::NegativeBalance { .. } => write!(f, "Warning: Your balance is negative!"),
        }
    }
}

/// Result of evaluating every budget check against a transaction snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetAlerts {
    pub summary: DashboardSummary,
    pub total_budget_limit: Money,
    pub total_exceeded: bool,
    pub exceeded_categories: BTreeSet<String>,
    pub negative_balance: bool,
    category_actuals: BTreeMap<String, Money>,
    settings: BudgetSettings,
}

impl BudgetAlerts {
    /// Run all checks; `alerts_enabled` is not consulted here
    pub fn evaluate(transactions: &[Transaction], settings: &BudgetSettings) -> Self {
        let summary = DashboardSummary::from_transactions(transactions);
        let actuals = category_actuals(transactions);

        Self {
            total_budget_limit: settings.total_budget_limit,
            total_exceeded: evaluate_total_budget(summary.total_expense, settings.total_budget_limit),
            exceeded_categories: evaluate_category_budgets(&actuals, &settings.category_limits),
            negative_balance: evaluate_balance(summary.total_income, summary.total_expense),
            summary,
            category_actuals: actuals,
            settings: settings.clone(),
        }
    }

    /// Every triggered alert, regardless of the user's preference
    pub fn alerts(&self) -> Vec<Alert> {
        let mut alerts = Vec::new();

        if self.total_exceeded {
            alerts.push(Alert::TotalBudgetExceeded {
                limit: self.total_budget_limit,
                spent: self.summary.total_expense,
            });
        }

        for category in &self.exceeded_categories {
            alerts.push(Alert::CategoryBudgetExceeded {
                category: category.clone(),
                limit: self.settings.limit_for(category).unwrap_or_default(),
                spent: self.category_actuals.get(category).copied().unwrap_or_default(),
            });
        }

        if self.negative_balance {
            alerts.push(Alert::NegativeBalance {
                balance: self.summary.balance,
            });
        }

        alerts
    }

    /// Alerts to display: all of them when enabled, none otherwise
    pub fn surface(&self, alerts_enabled: bool) -> Vec<Alert> {
        if alerts_enabled {
            self.alerts()
        } else {
            Vec::new()
        }
    }

    pub fn any_triggered(&self) -> bool {
        self.total_exceeded || self.negative_balance || !self.exceeded_categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn amounts(pairs: &[(&str, i64)]) -> BTreeMap<String, Money> {
        pairs
            .iter()
            .map(|(c, units)| (c.to_string(), Money::from_units(*units)))
            .collect()
    }

    fn expense(units: i64, category: &str) -> Transaction {
        Transaction::expense(
            "test",
            Money::from_units(units),
            category,
            NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
        )
    }

    fn income(units: i64) -> Transaction {
        Transaction::income(
            "pay",
            Money::from_units(units),
            "Salary",
            NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
        )
    }

    #[test]
    fn test_total_budget() {
        assert!(evaluate_total_budget(Money::from_units(1900), Money::from_units(1850)));
        assert!(!evaluate_total_budget(Money::from_units(1850), Money::from_units(1850)));
        assert!(!evaluate_total_budget(Money::zero(), Money::zero()));
    }

    #[test]
    fn test_category_budgets_limit_is_not_exceeded() {
        let limits = amounts(&[("Food", 100), ("Transport", 50)]);
        let actuals = amounts(&[("Food", 120), ("Transport", 50)]);

        let exceeded = evaluate_category_budgets(&actuals, &limits);
        assert_eq!(exceeded.len(), 1);
        assert!(exceeded.contains("Food"));
    }

    #[test]
    fn test_category_without_limit_is_ignored() {
        let limits = amounts(&[("Food", 100)]);
        let actuals = amounts(&[("Pets", 5000)]);
        assert!(evaluate_category_budgets(&actuals, &limits).is_empty());
    }

    #[test]
    fn test_balance() {
        assert!(!evaluate_balance(Money::from_units(300), Money::from_units(300)));
        assert!(evaluate_balance(Money::from_units(300), Money::from_cents(30001)));
        assert!(!evaluate_balance(Money::from_units(300), Money::from_units(10)));
    }

    #[test]
    fn test_alerts_evaluate() {
        let mut settings = BudgetSettings::empty();
        settings.total_budget_limit = Money::from_units(150);
        settings.set_limit("Food", Money::from_units(100));
        settings.set_limit("Transport", Money::from_units(50));

        let txns = vec![income(100), expense(120, "Food"), expense(50, "Transport")];
        let result = BudgetAlerts::evaluate(&txns, &settings);

        assert!(result.total_exceeded);
        assert!(result.negative_balance);
        assert_eq!(result.exceeded_categories.len(), 1);
        assert!(result.any_triggered());

        let alerts = result.alerts();
        assert_eq!(alerts.len(), 3);
        assert_eq!(
            alerts[0].to_string(),
            "You have exceeded your total budget limit of 150.00!"
        );
        assert_eq!(
            alerts[1],
            Alert::CategoryBudgetExceeded {
                category: "Food".into(),
                limit: Money::from_units(100),
                spent: Money::from_units(120),
            }
        );
        assert_eq!(alerts[2].to_string(), "Warning: Your balance is negative!");
    }

    #[test]
    fn test_disabled_alerts_are_computed_but_not_surfaced() {
        let mut settings = BudgetSettings::empty();
        settings.total_budget_limit = Money::from_units(10);
        settings.alerts_enabled = false;

        let txns = vec![expense(20, "Food")];
        let result = BudgetAlerts::evaluate(&txns, &settings);

        assert!(result.total_exceeded);
        assert_eq!(result.alerts().len(), 2);
        assert!(result.surface(settings.alerts_enabled).is_empty());
        assert_eq!(result.surface(true).len(), 2);
    }

    #[test]
    fn test_nothing_triggered() {
        let txns = vec![income(300), expense(300, "Food")];
        let result = BudgetAlerts::evaluate(&txns, &BudgetSettings::default());
        assert!(!result.negative_balance);
        assert!(!result.total_exceeded);
        assert!(result.exceeded_categories.is_empty());
        assert!(result.surface(true).is_empty());
    }
}
