//! Configuration module for finboard
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - Application preferences persistence

pub mod paths;
pub mod settings;

pub use paths::FinboardPaths;
pub use settings::Settings;
