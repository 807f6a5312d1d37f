//! Tracing subscriber set-up.

use crate::config::{LogConfig, LogFormat};
use thermal_common::{ThermalError, ThermalResult};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `config.level` when it is set and parses. Fails if
/// the level is not a valid filter directive or a global subscriber is
/// already installed.
pub fn init_tracing(config: &LogConfig) -> ThermalResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => env_filter(&config.level)?,
    };

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true);

    let installed = match config.format {
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish()),
    };

    installed.map_err(|e| ThermalError::Config(format!("tracing already initialized: {}", e)))
}

/// Parse a filter directive such as `info` or `aether=debug,renderer=warn`.
pub(crate) fn env_filter(level: &str) -> ThermalResult<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| ThermalError::Config(format!("invalid log level '{}': {}", level, e)))
}
