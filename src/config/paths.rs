//! Path management for finboard
//!
//! ## Path Resolution Order
//!
//! 1. `FINBOARD_DATA_DIR` environment variable (if set)
//! 2. The platform config directory reported by `directories`
//!    (`~/.config/finboard` on Linux, `%APPDATA%\finboard\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::{FinboardError, FinboardResult};

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "FINBOARD_DATA_DIR";

/// Manages all paths used by finboard
#[derive(Debug, Clone)]
pub struct FinboardPaths {
    base_dir: PathBuf,
}

impl FinboardPaths {
    /// Resolve the base directory from the environment or the platform
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> FinboardResult<Self> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the transaction and budget files
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Application preferences (config.json)
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    pub fn budget_settings_file(&self) -> PathBuf {
        self.data_dir().join("budget_settings.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> FinboardResult<()> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FinboardError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FinboardError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Whether `finboard init` has been run here
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> FinboardResult<PathBuf> {
    ProjectDirs::from("", "", "finboard")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| FinboardError::Config("Could not determine home directory".into()))
}
