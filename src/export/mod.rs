//! Export module for finboard
//!
//! - CSV: transactions and aggregated series (spreadsheet-compatible)
//! - JSON: machine-readable full snapshot
//! - YAML: human-readable full snapshot

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{
    to_csv, write_csv, CsvRecord, BUDGET_HEADERS, CATEGORY_HEADERS, TRANSACTION_HEADERS,
    TREND_HEADERS,
};
pub use json::{export_full_json, import_from_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, import_from_yaml};
