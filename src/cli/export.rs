//! Export CLI commands

use clap::{Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

use crate::error::{FinboardError, FinboardResult};
use crate::export::{
    export_full_json, export_full_yaml, to_csv, BUDGET_HEADERS, CATEGORY_HEADERS,
    TRANSACTION_HEADERS, TREND_HEADERS,
};
use crate::services::{budget_vs_actual, group_by_category, group_by_time, TimeBucket};
use crate::storage::{write_text_atomic, Storage};

/// Snapshot format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Transactions as CSV
    Transactions {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Income and expense per period as CSV
    Trend {
        #[arg(short, long, default_value = "monthly")]
        bucket: TimeBucket,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Per-category totals as CSV
    Categories {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Budget against actual spending as CSV
    Budget {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Everything, as JSON or YAML
    Full {
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle export commands
///
/// Without `--output` the export goes to stdout.
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> FinboardResult<()> {
    let transactions = storage.transactions.get_all()?;

    let (text, output) = match cmd {
        ExportCommands::Transactions { output } => {
            (to_csv(&transactions, &TRANSACTION_HEADERS)?, output)
        }
        ExportCommands::Trend { bucket, output } => (
            to_csv(&group_by_time(&transactions, bucket), &TREND_HEADERS)?,
            output,
        ),
        ExportCommands::Categories { output } => (
            to_csv(&group_by_category(&transactions), &CATEGORY_HEADERS)?,
            output,
        ),
        ExportCommands::Budget { output } => {
            let settings = storage.budget.get()?;
            let rows = budget_vs_actual(&transactions, &settings.category_limits);
            (to_csv(&rows, &BUDGET_HEADERS)?, output)
        }
        ExportCommands::Full { format, output } => {
            let mut buffer = Vec::new();
            match format {
                ExportFormat::Json => export_full_json(storage, &mut buffer, true)?,
                ExportFormat::Yaml => export_full_yaml(storage, &mut buffer)?,
            }
            let text = String::from_utf8(buffer)
                .map_err(|e| FinboardError::Export(format!("Export is not valid UTF-8: {}", e)))?;
            (text, output)
        }
    };

    match output {
        Some(path) => {
            write_text_atomic(&path, &text)?;
            tracing::info!(path = %path.display(), "export written");
            eprintln!("Exported to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", text).map_err(|e| FinboardError::Io(e.to_string()))?;
        }
    }

    Ok(())
}
