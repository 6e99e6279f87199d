//! Budget settings repository
//!
//! Persists the single budget settings record in budget_settings.json. A
//! missing file yields the default limits.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{FinboardError, FinboardResult};
use crate::models::BudgetSettings;

use super::file_io::{read_json, write_json_atomic};

/// Repository for budget settings persistence
pub struct BudgetSettingsRepository {
    path: PathBuf,
    settings: RwLock<BudgetSettings>,
}

impl BudgetSettingsRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            settings: RwLock::new(BudgetSettings::default()),
        }
    }

    /// Load settings from disk
    pub fn load(&self) -> FinboardResult<()> {
        let loaded: BudgetSettings = read_json(&self.path)?;

        let mut settings = self
            .settings
            .write()
            .map_err(|e| FinboardError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *settings = loaded;

        tracing::info!(
            limits = settings.category_limits.len(),
            alerts = settings.alerts_enabled,
            "loaded budget settings"
        );
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self) -> FinboardResult<()> {
        let settings = self
            .settings
            .read()
            .map_err(|e| FinboardError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*settings)
    }

    /// Current settings
    pub fn get(&self) -> FinboardResult<BudgetSettings> {
        let settings = self
            .settings
            .read()
            .map_err(|e| FinboardError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(settings.clone())
    }

    /// Replace the settings after validating them
    ///
    /// Invalid settings leave the stored ones untouched.
    pub fn set(&self, new_settings: BudgetSettings) -> FinboardResult<()> {
        new_settings.validate()?;

        let mut settings = self
            .settings
            .write()
            .map_err(|e| FinboardError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *settings = new_settings;

        tracing::debug!("updated budget settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, BudgetSettingsRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetSettingsRepository::new(temp_dir.path().join("budget_settings.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.get().unwrap(), BudgetSettings::default());
    }

    #[test]
    fn test_set_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();

        let mut settings = BudgetSettings::empty();
        settings.total_budget_limit = Money::from_units(500);
        settings.set_limit("Food", Money::from_units(200));
        settings.alerts_enabled = false;

        repo.set(settings.clone()).unwrap();
        repo.save().unwrap();

        let repo2 = BudgetSettingsRepository::new(temp_dir.path().join("budget_settings.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.get().unwrap(), settings);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let (_temp_dir, repo) = create_test_repo();

        let mut settings = BudgetSettings::empty();
        settings.total_budget_limit = Money::from_units(100);
        settings.set_limit("Food", Money::from_units(200));

        assert!(repo.set(settings).is_err());
        assert_eq!(repo.get().unwrap(), BudgetSettings::default());
    }
}
