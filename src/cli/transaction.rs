//! Transaction CLI commands
//!
//! Adding, editing, deleting and listing transactions.

use chrono::Local;
use clap::{Subcommand, ValueEnum};

use crate::config::settings::Settings;
use crate::display::{
    format_transaction_details, format_transaction_list, format_transaction_page,
};
use crate::error::{FinboardError, FinboardResult};
use crate::models::{
    assign_category, KnownCategory, Money, Transaction, TransactionDate, TransactionId,
    TransactionType,
};
use crate::services::{recent, unique_categories, SortBy, TransactionFilter};
use crate::storage::Storage;

/// Transaction type as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for TransactionType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Income => TransactionType::Income,
            KindArg::Expense => TransactionType::Expense,
        }
    }
}

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// What the money was for
        description: String,
        /// Amount (e.g., "130" or "12.50")
        amount: String,
        /// Income or expense
        #[arg(short = 't', long = "type", value_enum, default_value = "expense")]
        kind: KindArg,
        /// Category; guessed from the description when omitted
        #[arg(short, long)]
        category: Option<String>,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Change fields of an existing transaction
    Edit {
        id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short = 't', long = "type", value_enum)]
        kind: Option<KindArg>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete a transaction
    #[command(alias = "rm")]
    Delete { id: String },

    /// Show one transaction
    Show { id: String },

    /// List transactions
    #[command(alias = "ls")]
    List {
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Only this type
        #[arg(short = 't', long = "type", value_enum)]
        kind: Option<KindArg>,
        /// Order by amount or date
        #[arg(short, long)]
        sort: Option<SortBy>,
        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,
        /// Rows per page
        #[arg(short, long, default_value = "10")]
        rows: usize,
    },

    /// Show the newest transactions
    Recent {
        /// How many to show (defaults to the configured limit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

/// Handle transaction commands
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> FinboardResult<()> {
    match cmd {
        TransactionCommands::Add {
            description,
            amount,
            kind,
            category,
            date,
        } => {
            let kind = TransactionType::from(kind);
            let category = category.unwrap_or_else(|| default_category(&description, &kind));
            let txn = Transaction {
                id: storage.transactions.next_id()?,
                description,
                amount: parse_amount(&amount)?,
                kind,
                category,
                date: parse_date_or_today(date.as_deref()),
            };
            txn.validate()?;

            storage.transactions.add(txn.clone())?;
            storage.transactions.save()?;

            println!("Added transaction {}", txn.id);
            print!("{}", format_transaction_details(&txn));
        }

        TransactionCommands::Edit {
            id,
            description,
            amount,
            kind,
            category,
            date,
        } => {
            let id = parse_id(&id)?;
            let mut txn = storage
                .transactions
                .get(id)?
                .ok_or_else(|| FinboardError::transaction_not_found(id.to_string()))?;

            if let Some(description) = description {
                txn.description = description;
            }
            if let Some(amount) = amount {
                txn.amount = parse_amount(&amount)?;
            }
            if let Some(kind) = kind {
                txn.kind = kind.into();
            }
            if let Some(category) = category {
                txn.category = category;
            }
            if let Some(date) = date {
                txn.date = TransactionDate::parse(&date);
            }
            txn.validate()?;

            storage.transactions.update(txn.clone())?;
            storage.transactions.save()?;

            println!("Updated transaction {}", txn.id);
            print!("{}", format_transaction_details(&txn));
        }

        TransactionCommands::Delete { id } => {
            let id = parse_id(&id)?;
            if !storage.transactions.delete(id)? {
                return Err(FinboardError::transaction_not_found(id.to_string()));
            }
            storage.transactions.save()?;
            println!("Deleted transaction {}", id);
        }

        TransactionCommands::Show { id } => {
            let id = parse_id(&id)?;
            let txn = storage
                .transactions
                .get(id)?
                .ok_or_else(|| FinboardError::transaction_not_found(id.to_string()))?;
            print!("{}", format_transaction_details(&txn));
        }

        TransactionCommands::List {
            category,
            kind,
            sort,
            page,
            rows,
        } => {
            let transactions = storage.transactions.get_all()?;
            let mut filter = TransactionFilter::new().page(page, rows);
            if let Some(sort) = sort {
                filter = filter.sort_by(sort);
            }
            if let Some(category) = &category {
                filter = filter.category(category.as_str());
            }
            if let Some(kind) = kind {
                filter = filter.kind(kind.into());
            }
            let result = filter.apply(&transactions);
            print!("{}", format_transaction_page(&result, &settings.date_format));

            if category.is_some() && result.total_items == 0 && !transactions.is_empty() {
                println!(
                    "Categories in use: {}",
                    unique_categories(&transactions).join(", ")
                );
            }
        }

        TransactionCommands::Recent { limit } => {
            let transactions = storage.transactions.get_all()?;
            let newest = recent(&transactions, limit.unwrap_or(settings.recent_limit));
            print!("{}", format_transaction_list(&newest, &settings.date_format));
        }
    }

    Ok(())
}

fn default_category(description: &str, kind: &TransactionType) -> String {
    match kind {
        TransactionType::Income => KnownCategory::OtherIncome.name().to_string(),
        _ => assign_category(description).name().to_string(),
    }
}

pub(crate) fn parse_amount(input: &str) -> FinboardResult<Money> {
    Money::parse(input).map_err(|e| FinboardError::Validation(e.to_string()))
}

fn parse_id(input: &str) -> FinboardResult<TransactionId> {
    input
        .parse()
        .map_err(|_| FinboardError::Validation(format!("Invalid transaction id: {}", input)))
}

fn parse_date_or_today(input: Option<&str>) -> TransactionDate {
    match input {
        Some(date) => TransactionDate::parse(date),
        None => TransactionDate::Valid(Local::now().date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_category() {
        assert_eq!(
            default_category("Weekly supermarket run", &TransactionType::Expense),
            assign_category("Weekly supermarket run").name()
        );
        assert_eq!(
            default_category("Caixabank Tech", &TransactionType::Income),
            "Other Income"
        );
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_amount("12.50").unwrap(), Money::from_cents(1250));
        assert!(parse_amount("twelve").unwrap_err().is_validation());
        assert_eq!(parse_id("txn-42").unwrap(), TransactionId::from_raw(42));
        assert!(parse_id("abc").is_err());
        assert!(parse_date_or_today(None).is_valid());
        assert!(!parse_date_or_today(Some("31/31/2024")).is_valid());
    }
}
