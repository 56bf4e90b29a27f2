//! Configuration loading and management for the payroll engine.
//!
//! This module loads the company-wide [`PayrollSettings`] from a YAML file.
//! The settings are read once and passed explicitly into the engine; no
//! calculation reads configuration on its own.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::SettingsLoader;
//!
//! let loader = SettingsLoader::load("./config/settings.yaml").unwrap();
//! println!("Company: {}", loader.settings().company_name);
//! ```

mod loader;
mod types;

pub use loader::SettingsLoader;
pub use types::{DEFAULT_UTC_OFFSET_MINUTES, PayrollSettings};
