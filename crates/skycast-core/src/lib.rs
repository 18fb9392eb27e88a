pub mod config;
pub mod error;

pub use crate::config::{Config, LoggingConfig, ValidationResult, WeatherConfig};
pub use crate::error::{AppError, ConfigError, NetworkError, ReqwestErrorExt};

use anyhow::Result;

/// Initialize tracing/logging
///
/// `RUST_LOG` wins over `default_filter`. Output goes to stderr so that
/// stdout carries only command output.
pub fn init(default_filter: &str) -> Result<()> {
    let fallback = if default_filter.trim().is_empty() {
        "info"
    } else {
        default_filter
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    tracing::debug!("SkyCast core initialized");
    Ok(())
}
