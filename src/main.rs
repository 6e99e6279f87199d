use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use finboard::cli::{
    handle_budget_command, handle_export_command, handle_report_command,
    handle_transaction_command, BudgetCommands, ExportCommands, ReportCommands,
    TransactionCommands,
};
use finboard::config::{paths::FinboardPaths, settings::Settings};
use finboard::storage::{init::initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "finboard",
    version,
    about = "Personal finance dashboard for the terminal",
    long_about = "finboard records income and expenses and turns them into \
                  trends, category breakdowns, statistics and budget alerts."
)]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Directory holding config and data files
    #[arg(long, global = true, env = "FINBOARD_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the config and data files
    Init {
        /// Also add a few sample transactions
        #[arg(long)]
        sample: bool,
    },

    /// Show current configuration and paths
    Config,

    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Dashboard reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Budget limits and alerts
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Export data to CSV, JSON or YAML
    #[command(subcommand)]
    Export(ExportCommands),
}

fn init_logging(verbose: u8) {
    // RUST_LOG wins over -v
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        })
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = match cli.data_dir {
        Some(dir) => FinboardPaths::with_base_dir(dir),
        None => FinboardPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("finboard - personal finance dashboard");
            println!();
            println!("Run 'finboard --help' for usage information.");
            return Ok(());
        }
    };

    match command {
        Commands::Init { sample } => {
            println!("Initializing finboard at: {}", paths.base_dir().display());
            initialize_storage(&paths, sample)?;
            println!("Initialization complete!");
            if sample {
                println!("Sample transactions were added. Try 'finboard report summary'.");
            }
        }
        Commands::Config => {
            println!("finboard Configuration");
            println!("======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Initialized:    {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Recent limit:    {}", settings.recent_limit);
            println!("  Default bucket:  {}", settings.default_bucket);
        }
        Commands::Txn(cmd) => {
            let storage = Storage::open(paths)?;
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Commands::Report(cmd) => {
            let storage = Storage::open(paths)?;
            handle_report_command(&storage, &settings, cmd)?;
        }
        Commands::Budget(cmd) => {
            let storage = Storage::open(paths)?;
            handle_budget_command(&storage, cmd)?;
        }
        Commands::Export(cmd) => {
            let storage = Storage::open(paths)?;
            handle_export_command(&storage, cmd)?;
        }
    }

    Ok(())
}
