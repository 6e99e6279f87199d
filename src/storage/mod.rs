//! Storage layer for finboard
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. The analytics pipeline only ever sees snapshots taken from here.

pub mod budget;
pub mod file_io;
pub mod init;
pub mod transactions;

pub use budget::BudgetSettingsRepository;
pub use file_io::{read_json, write_json_atomic, write_text_atomic};
pub use init::initialize_storage;
pub use transactions::TransactionRepository;

use crate::config::paths::FinboardPaths;
use crate::error::FinboardResult;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FinboardPaths,
    pub transactions: TransactionRepository,
    pub budget: BudgetSettingsRepository,
}

impl Storage {
    /// Create a new Storage instance without loading anything
    pub fn new(paths: FinboardPaths) -> FinboardResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            budget: BudgetSettingsRepository::new(paths.budget_settings_file()),
            paths,
        })
    }

    /// Create a Storage instance and load everything from disk
    pub fn open(paths: FinboardPaths) -> FinboardResult<Self> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &FinboardPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> FinboardResult<()> {
        self.transactions.load()?;
        self.budget.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> FinboardResult<()> {
        self.transactions.save()?;
        self.budget.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinboardPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_save_all_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinboardPaths::with_base_dir(temp_dir.path().to_path_buf());

        let storage = Storage::new(paths.clone()).unwrap();
        storage
            .transactions
            .replace(init::sample_transactions().unwrap())
            .unwrap();
        storage.save_all().unwrap();

        let reopened = Storage::open(paths).unwrap();
        assert_eq!(reopened.transactions.len().unwrap(), 6);
    }
}
