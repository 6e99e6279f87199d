//! Display formatting for terminal output
//!
//! Turns transactions and pipeline results into plain text. Nothing here
//! computes; every figure comes from the service layer.

pub mod budget;
pub mod report;
pub mod transaction;

pub use budget::{format_alerts, format_budget_comparison, format_budget_settings};
pub use report::{
    format_balance, format_categories, format_stats, format_summary, format_trend,
};
pub use transaction::{
    format_date, format_transaction_details, format_transaction_list, format_transaction_page,
    format_transaction_row,
};
