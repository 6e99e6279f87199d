//! Budget display formatting

use crate::models::BudgetSettings;
use crate::services::{Alert, BudgetComparison};

use super::report::{format_bar, truncate};

/// Format the configured limits
pub fn format_budget_settings(settings: &BudgetSettings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Total budget limit: {}\n", settings.total_budget_limit));
    output.push_str(&format!(
        "Alerts:             {}\n\n",
        if settings.alerts_enabled { "on" } else { "off" }
    ));

    if settings.category_limits.is_empty() {
        output.push_str("No category limits set.\n");
        return output;
    }

    output.push_str(&format!("{:<24} {:>12}\n", "Category", "Limit"));
    output.push_str(&"-".repeat(37));
    output.push('\n');
    for (category, limit) in &settings.category_limits {
        output.push_str(&format!("{:<24} {:>12}\n", truncate(category, 24), limit));
    }
    output.push_str(&"-".repeat(37));
    output.push('\n');
    output.push_str(&format!(
        "{:<24} {:>12}\n",
        "Allocated",
        settings.total_category_limits()
    ));

    let unbudgeted = settings.unbudgeted_known_categories();
    if !unbudgeted.is_empty() {
        let names: Vec<&str> = unbudgeted.iter().map(|c| c.name()).collect();
        output.push_str(&format!("\nWithout a limit: {}\n", names.join(", ")));
    }

    output
}

/// Format budget vs actual per category
pub fn format_budget_comparison(rows: &[BudgetComparison]) -> String {
    if rows.is_empty() {
        return "No category limits set.\n".to_string();
    }

    let mut output = format!(
        "{:<22} {:>10} {:>10} {:>10}  {}\n",
        "Category", "Budget", "Actual", "Remaining", "Used"
    );
    output.push_str(&"-".repeat(76));
    output.push('\n');

    for row in rows {
        let marker = if row.actual > row.budget { " !" } else { "" };
        output.push_str(&format!(
            "{:<22} {:>10} {:>10} {:>10}  {} {:.0}%{}\n",
            truncate(&row.category, 22),
            row.budget,
            row.actual,
            row.remaining(),
            format_bar(row.actual.cents() as f64, row.budget.cents() as f64, 12),
            row.percent_used(),
            marker
        ));
    }

    output
}

/// Format alerts, one per line
pub fn format_alerts(alerts: &[Alert]) -> String {
    if alerts.is_empty() {
        return "All budgets are within their limits.\n".to_string();
    }

    alerts.iter().map(|alert| format!("! {}\n", alert)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_settings_table() {
        let text = format_budget_settings(&BudgetSettings::default());
        assert!(text.contains("Total budget limit: 1850.00"));
        assert!(text.contains("Alerts:             on"));
        assert!(text.contains("Gifts and Donations"));
        assert!(text.contains("1830.00"));
        assert!(!text.contains("Without a limit"));

        let mut partial = BudgetSettings::default();
        partial.category_limits.remove("Travel");
        let text = format_budget_settings(&partial);
        assert!(text.contains("Without a limit: Travel"));
    }

    #[test]
    fn test_comparison_marks_overspending() {
        let rows = vec![
            BudgetComparison {
                category: "Food".into(),
                budget: Money::from_units(100),
                actual: Money::from_units(120),
            },
            BudgetComparison {
                category: "Travel".into(),
                budget: Money::from_units(100),
                actual: Money::zero(),
            },
        ];
        let text = format_budget_comparison(&rows);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[2].starts_with("Food"));
        assert!(lines[2].ends_with("120% !"));
        assert!(lines[3].ends_with("0%"));
    }

    #[test]
    fn test_alerts() {
        assert_eq!(format_alerts(&[]), "All budgets are within their limits.\n");

        let alerts = vec![Alert::NegativeBalance {
            balance: Money::from_units(-5),
        }];
        assert_eq!(format_alerts(&alerts), "! Warning: Your balance is negative!\n");
    }
}
