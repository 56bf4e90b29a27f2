//! Settings loading functionality.
//!
//! This module provides the [`SettingsLoader`] type for loading payroll
//! settings from a YAML file.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};

use super::types::PayrollSettings;

/// Loads and provides access to payroll settings.
///
/// The settings file is a single YAML document. Every key is optional:
///
/// ```text
/// company_name: My Company     # shown on statements
/// closing_date: 31             # 1-31, 31 = end of month
/// night_shift_start: "22:00"   # display only
/// utc_offset_minutes: 540      # offset used for "now"
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::SettingsLoader;
///
/// let loader = SettingsLoader::load("./config/settings.yaml")?;
/// println!("Closing day: {}", loader.settings().closing_date.day());
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    settings: PayrollSettings,
}

impl SettingsLoader {
    /// Loads settings from the given YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigNotFound`] if the file cannot be read and
    /// [`EngineError::ConfigParseError`] if it is not valid settings YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let settings = Self::load_yaml::<PayrollSettings>(path)?;

        if settings.night_start_is_display_only() {
            warn!(
                night_shift_start = %settings.night_shift_start,
                "night_shift_start is display only; pay uses the 22:00-05:00 window"
            );
        }

        info!(
            path = %path.display(),
            company_name = %settings.company_name,
            closing_date = settings.closing_date.day(),
            "Loaded payroll settings"
        );

        Ok(Self { settings })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &PayrollSettings {
        &self.settings
    }

    /// Consumes the loader, returning the settings.
    pub fn into_settings(self) -> PayrollSettings {
        self.settings
    }
}
