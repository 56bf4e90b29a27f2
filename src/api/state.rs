//! Application state for the payroll engine API.

use std::sync::Arc;

use crate::config::PayrollSettings;

/// Shared application state.
///
/// Holds the settings snapshot read at startup. Handlers never reload it.
#[derive(Clone)]
pub struct AppState {
    settings: Arc<PayrollSettings>,
}

impl AppState {
    /// Creates a new application state from loaded settings.
    pub fn new(settings: PayrollSettings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }

    /// Returns the settings snapshot.
    pub fn settings(&self) -> &PayrollSettings {
        &self.settings
    }
}
