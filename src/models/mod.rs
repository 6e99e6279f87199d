//! Core data models for finboard
//!
//! Transactions, their dates and amounts, the category catalog and the
//! budget settings that alerts are evaluated against.

pub mod budget;
pub mod category;
pub mod date;
pub mod ids;
pub mod money;
pub mod transaction;

pub use budget::BudgetSettings;
pub use category::{assign_category, CategoryKind, CategoryName, KnownCategory};
pub use date::TransactionDate;
pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use transaction::{Transaction, TransactionType};
