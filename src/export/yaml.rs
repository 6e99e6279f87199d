//! YAML Export functionality
//!
//! Same snapshot as the JSON export, in a human-readable form.

use std::io::Write;

use crate::error::{FinboardError, FinboardResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the full snapshot to YAML
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> FinboardResult<()> {
    let export = FullExport::from_storage(storage)?;

    let header = format!(
        "# finboard export\n# Generated: {}\n# App Version: {}\n\n",
        export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| FinboardError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| FinboardError::Export(e.to_string()))?;

    Ok(())
}

/// Read back a YAML export and validate it
pub fn import_from_yaml(yaml_str: &str) -> FinboardResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| FinboardError::Export(e.to_string()))?;
    export.validate()?;
    Ok(export)
}
