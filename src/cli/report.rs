//! CLI commands for reports
//!
//! Each report takes one snapshot of the stored transactions and runs it
//! through the pipeline.

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{
    format_alerts, format_balance, format_budget_comparison, format_categories, format_stats,
    format_summary, format_trend,
};
use crate::error::{FinboardError, FinboardResult};
use crate::services::{
    average_daily_expense, budget_vs_actual, cumulative_balance, group_by_category,
    group_by_time, highest_spending_category, month_over_month_delta, BudgetAlerts,
    TimeBucket,
};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Totals, balance and any active alerts
    Summary,

    /// Income and expense per period
    Trend {
        /// daily, weekly, monthly or yearly (defaults to the configured bucket)
        #[arg(short, long)]
        bucket: Option<TimeBucket>,
    },

    /// Income and expense per category
    Categories,

    /// Running balance in date order
    Balance,

    /// Configured limits against actual spending
    Budget,

    /// Average daily expense, top category and month-over-month change
    Stats {
        /// Any date in the month to compare (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> FinboardResult<()> {
    let transactions = storage.transactions.get_all()?;

    match cmd {
        ReportCommands::Summary => {
            let budget = storage.budget.get()?;
            let evaluation = BudgetAlerts::evaluate(&transactions, &budget);

            print!("{}", format_summary(&evaluation.summary, &settings.currency_symbol));

            let alerts = evaluation.surface(budget.alerts_enabled);
            if !alerts.is_empty() {
                println!();
                print!("{}", format_alerts(&alerts));
            }
        }

        ReportCommands::Trend { bucket } => {
            let bucket = bucket.unwrap_or(settings.default_bucket);
            print!("{}", format_trend(&group_by_time(&transactions, bucket), bucket));
        }

        ReportCommands::Categories => {
            print!("{}", format_categories(&group_by_category(&transactions)));
        }

        ReportCommands::Balance => {
            print!("{}", format_balance(&cumulative_balance(&transactions)));
        }

        ReportCommands::Budget => {
            let budget = storage.budget.get()?;
            let rows = budget_vs_actual(&transactions, &budget.category_limits);
            print!("{}", format_budget_comparison(&rows));
        }

        ReportCommands::Stats { month } => {
            let reference = match month {
                Some(input) => parse_reference_date(&input)?,
                None => Local::now().date_naive(),
            };

            let highest = highest_spending_category(&transactions);
            print!(
                "{}",
                format_stats(
                    average_daily_expense(&transactions),
                    highest.as_ref(),
                    &month_over_month_delta(&transactions, reference),
                    &settings.currency_symbol,
                )
            );
        }
    }

    Ok(())
}

/// Accepts a full date or a bare `YYYY-MM`
fn parse_reference_date(input: &str) -> FinboardResult<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", input), "%Y-%m-%d"))
        .map_err(|_| {
            FinboardError::Validation(format!(
                "Invalid month '{}': use YYYY-MM or YYYY-MM-DD",
                input
            ))
        })
}
