//! Storage initialization
//!
//! Handles first-run setup: preferences, default budget settings and,
//! optionally, a small set of sample transactions.

use chrono::NaiveDate;

use crate::config::paths::FinboardPaths;
use crate::config::settings::Settings;
use crate::error::{FinboardError, FinboardResult};
use crate::models::{BudgetSettings, Money, Transaction, TransactionId, TransactionType};

use super::file_io::write_json_atomic;
use super::transactions::TransactionRepository;

/// Initialize storage for a fresh installation
///
/// Existing files are never overwritten. Sample transactions are only written
/// when no transactions file exists yet.
pub fn initialize_storage(paths: &FinboardPaths, with_sample: bool) -> FinboardResult<()> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
    }

    if !paths.budget_settings_file().exists() {
        write_json_atomic(paths.budget_settings_file(), &BudgetSettings::default())?;
    }

    if with_sample && !paths.transactions_file().exists() {
        let transactions = sample_transactions()?;
        tracing::info!(count = transactions.len(), "seeding sample transactions");
        let repo = TransactionRepository::new(paths.transactions_file());
        repo.replace(transactions)?;
        repo.save()?;
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &FinboardPaths) -> bool {
    !paths.is_initialized()
}

/// The starter data set: one month of salary and a few expenses
///
/// The two salary records were historically stored under the same id; the
/// second one is given the following id so every record stays addressable.
pub fn sample_transactions() -> FinboardResult<Vec<Transaction>> {
    let rows: [(i64, &str, i64, TransactionType, &str, &str); 6] = [
        (1730050032447, "Caixabank Tech", 2300, TransactionType::Income, "Salary", "2024-10-27"),
        (1730049802671, "Shoes", 110, TransactionType::Expense, "Clothing", "2024-10-21"),
        (1730049959397, "Pharmacy", 50, TransactionType::Expense, "Health", "2024-10-24"),
        (1730049979509, "Rent", 850, TransactionType::Expense, "Housing", "2024-10-18"),
        (1730050013378, "Supermarket", 130, TransactionType::Expense, "Food", "2024-10-26"),
        (1730050032447, "Caixabank Tech", 2300, TransactionType::Income, "Salary", "2024-09-27"),
    ];

    let mut transactions: Vec<Transaction> = Vec::with_capacity(rows.len());
    for (raw_id, description, units, kind, category, date) in rows {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| FinboardError::Validation(format!("Bad sample date {}: {}", date, e)))?;

        let mut id = TransactionId::from_raw(raw_id);
        while transactions.iter().any(|t| t.id == id) {
            id = id.next();
        }

        transactions.push(Transaction::with_id(
            id,
            description,
            Money::from_units(units),
            kind,
            category,
            date,
        ));
    }

    Ok(transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinboardPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));

        initialize_storage(&paths, false).unwrap();

        assert!(!needs_initialization(&paths));
        assert!(paths.budget_settings_file().exists());
        assert!(!paths.transactions_file().exists());
    }

    #[test]
    fn test_sample_data_is_loadable() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinboardPaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths, true).unwrap();

        let storage = Storage::open(paths).unwrap();
        let transactions = storage.transactions.get_all().unwrap();
        assert_eq!(transactions.len(), 6);
        assert_eq!(transactions[0].description, "Caixabank Tech");
        assert_eq!(storage.budget.get().unwrap(), BudgetSettings::default());
    }

    #[test]
    fn test_sample_ids_are_unique() {
        let transactions = sample_transactions().unwrap();
        assert_eq!(transactions[5].id.as_i64(), 1730050032448);
        assert!(transactions.iter().all(|t| t.validate().is_ok()));
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinboardPaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths, false).unwrap();

        let mut custom = BudgetSettings::empty();
        custom.total_budget_limit = Money::from_units(42);
        write_json_atomic(paths.budget_settings_file(), &custom).unwrap();

        initialize_storage(&paths, true).unwrap();

        let content = std::fs::read_to_string(paths.budget_settings_file()).unwrap();
        let loaded: BudgetSettings = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded.total_budget_limit, Money::from_units(42));
    }
}
