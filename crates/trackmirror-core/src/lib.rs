pub mod config;
pub mod error;
pub mod trigger_state;

pub use config::{Config, ServerConfig, UiConfig, ValidationResult};
pub use error::{AppError, ConfigError, NetworkError, ReqwestErrorExt, TrackerError};
pub use trigger_state::TriggerState;

use anyhow::Result;

/// Initialize logging for trackmirror.
///
/// Reads `RUST_LOG`, defaulting to `info`. Safe to call more than once.
pub fn init() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    tracing::info!("trackmirror core initialized");
    Ok(())
}
