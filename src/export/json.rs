//! JSON Export functionality
//!
//! Exports every transaction and the budget settings as one versioned
//! snapshot.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{FinboardError, FinboardResult};
use crate::models::{BudgetSettings, Transaction};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full snapshot export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub transactions: Vec<Transaction>,

    pub budget_settings: BudgetSettings,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,

    /// Earliest valid transaction date
    pub earliest_transaction: Option<NaiveDate>,

    /// Latest valid transaction date
    pub latest_transaction: Option<NaiveDate>,

    /// Records whose date could not be parsed
    pub invalid_dates: usize,
}

impl FullExport {
    /// Build an export from in-memory data
    pub fn new(transactions: Vec<Transaction>, budget_settings: BudgetSettings) -> Self {
        let dates = || transactions.iter().filter_map(|t| t.date.as_date());

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            earliest_transaction: dates().min(),
            latest_transaction: dates().max(),
            invalid_dates: transactions.iter().filter(|t| !t.date.is_valid()).count(),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            transactions,
            budget_settings,
            metadata,
        }
    }

    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage) -> FinboardResult<Self> {
        Ok(Self::new(
            storage.transactions.get_all()?,
            storage.budget.get()?,
        ))
    }

    /// Check the schema version and the embedded budget settings
    pub fn validate(&self) -> FinboardResult<()> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(FinboardError::Export(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            )));
        }

        self.budget_settings.validate()
    }
}

/// Export the full snapshot to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> FinboardResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| FinboardError::Export(e.to_string()))?;

    Ok(())
}

/// Read back a JSON export and validate it
pub fn import_from_json(json_str: &str) -> FinboardResult<FullExport> {
    let export: FullExport = serde_json::from_str(json_str)?;
    export.validate()?;
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinboardPaths;
    use crate::models::TransactionDate;
    use crate::storage::init::sample_transactions;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinboardPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        storage
            .transactions
            .replace(sample_transactions().unwrap())
            .unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_full_export() {
        let (_temp_dir, storage) = create_test_storage();

        let mut output = Vec::new();
        export_full_json(&storage, &mut output, true).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(json["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(json["transactions"].as_array().unwrap().len(), 6);
        assert_eq!(json["transactions"][1]["type"], "expense");
        assert_eq!(json["budget_settings"]["totalBudgetLimit"], 1850);
        assert_eq!(json["metadata"]["earliest_transaction"], "2024-09-27");
        assert_eq!(json["metadata"]["latest_transaction"], "2024-10-27");
    }

    #[test]
    fn test_json_round_trip() {
        let (_temp_dir, storage) = create_test_storage();

        let mut output = Vec::new();
        export_full_json(&storage, &mut output, false).unwrap();

        let imported = import_from_json(&String::from_utf8(output).unwrap()).unwrap();
        assert_eq!(imported.transactions, storage.transactions.get_all().unwrap());
        assert_eq!(imported.budget_settings, BudgetSettings::default());
    }

    #[test]
    fn test_invalid_dates_counted() {
        let mut transactions = sample_transactions().unwrap();
        transactions[0].date = TransactionDate::parse("yesterday");

        let export = FullExport::new(transactions, BudgetSettings::default());
        assert_eq!(export.metadata.invalid_dates, 1);
        assert_eq!(export.metadata.transaction_count, 6);
    }

    #[test]
    fn test_schema_mismatch_rejected() {
        let mut export = FullExport::new(Vec::new(), BudgetSettings::default());
        export.schema_version = "0.1.0".into();
        assert!(export.validate().is_err());
    }
}
