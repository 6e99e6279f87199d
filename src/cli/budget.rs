//! Budget CLI commands
//!
//! Viewing and changing the budget limits, toggling alerts, and running the
//! budget checks on demand.

use clap::{Subcommand, ValueEnum};

use crate::display::{format_alerts, format_budget_settings};
use crate::error::FinboardResult;
use crate::models::CategoryName;
use crate::services::BudgetAlerts;
use crate::storage::Storage;

use super::transaction::parse_amount;

/// On/off switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Show the configured limits
    Show,

    /// Set the total budget limit
    SetTotal {
        /// Amount (e.g., "1850")
        amount: String,
    },

    /// Set the limit of one category
    Set {
        category: String,
        amount: String,
    },

    /// Remove the limit of one category
    Unset { category: String },

    /// Turn budget alerts on or off
    Alerts {
        #[arg(value_enum)]
        state: Toggle,
    },

    /// Evaluate the budget against recorded transactions
    Check,
}

/// Handle budget commands
pub fn handle_budget_command(storage: &Storage, cmd: BudgetCommands) -> FinboardResult<()> {
    let mut settings = storage.budget.get()?;

    match cmd {
        BudgetCommands::Show => {
            print!("{}", format_budget_settings(&settings));
            return Ok(());
        }

        BudgetCommands::Check => {
            let transactions = storage.transactions.get_all()?;
            let evaluation = BudgetAlerts::evaluate(&transactions, &settings);

            if settings.alerts_enabled {
                print!("{}", format_alerts(&evaluation.surface(true)));
            } else {
                println!("Budget alerts are turned off.");
                if evaluation.any_triggered() {
                    println!("Some checks failed. Run `finboard budget alerts on` to see them.");
                }
            }
            return Ok(());
        }

        BudgetCommands::SetTotal { amount } => {
            settings.total_budget_limit = parse_amount(&amount)?;
        }

        BudgetCommands::Set { category, amount } => {
            let category = CategoryName::parse(&category)?;
            settings.set_limit(category.as_str(), parse_amount(&amount)?);
        }

        BudgetCommands::Unset { category } => {
            let category = CategoryName::parse(&category)?;
            if settings.remove_limit(category.as_str()).is_none() {
                println!("No limit was set for {}.", category);
                return Ok(());
            }
        }

        BudgetCommands::Alerts { state } => {
            settings.alerts_enabled = state == Toggle::On;
        }
    }

    storage.budget.set(settings.clone())?;
    storage.budget.save()?;

    println!("Budget settings saved.");
    print!("{}", format_budget_settings(&settings));
    Ok(())
}
