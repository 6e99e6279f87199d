//! finboard - personal finance dashboard
//!
//! This library turns a flat list of income and expense transactions into
//! the figures a finance dashboard shows: per-period and per-category
//! totals, a running balance, headline metrics, a month-over-month trend and
//! budget alerts.
//!
//! # Architecture
//!
//! - `models`: transactions, dates, amounts, categories and budget settings
//! - `services`: the analytics pipeline (aggregation, metrics, budget
//!   evaluation, listing queries); pure functions over a snapshot
//! - `storage`: JSON file storage layer
//! - `config`: path resolution and application preferences
//! - `export`: CSV, JSON and YAML exports
//! - `display` / `cli`: terminal presentation
//! - `error`: custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use finboard::config::paths::FinboardPaths;
//! use finboard::services::{group_by_time, TimeBucket};
//! use finboard::storage::Storage;
//!
//! let storage = Storage::open(FinboardPaths::new()?)?;
//! let monthly = group_by_time(&storage.transactions.get_all()?, TimeBucket::Monthly);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{FinboardError, FinboardResult};
