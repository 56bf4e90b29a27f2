//! Payroll engine HTTP server.
//!
//! Reads settings from the YAML file named by `PAYROLL_SETTINGS` (defaults
//! when unset) and listens on `PAYROLL_BIND` (default `127.0.0.1:3000`).
//! Log verbosity follows `RUST_LOG`.

use std::env;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::{PayrollSettings, SettingsLoader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Initialize tracing for the server
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    debug!("Payroll engine {} starting", env!("CARGO_PKG_VERSION"));
}

fn load_settings() -> Result<PayrollSettings, Box<dyn std::error::Error>> {
    match env::var("PAYROLL_SETTINGS") {
        Ok(path) => Ok(SettingsLoader::load(path)?.into_settings()),
        Err(_) => {
            info!("PAYROLL_SETTINGS not set, using default settings");
            Ok(PayrollSettings::default())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let settings = load_settings()?;
    let bind = env::var("PAYROLL_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());

    let router = create_router(AppState::new(settings));
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!(address = %bind, "Payroll engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
