//! Tracing setup: structured logging plus span definitions.

pub mod spans;

use tracing_subscriber::EnvFilter;

use tessera_core::config::ObservabilityConfig;
use tessera_core::errors::ConfigError;

/// Environment variable that overrides the configured filter.
pub const LOG_ENV_VAR: &str = "TESSERA_LOG";

/// Install a global subscriber filtered by `TESSERA_LOG`, falling back to
/// `config.log_level`.
///
/// Idempotent: if a subscriber is already installed (by the host
/// application or an earlier call) this leaves it in place. An unparsable
/// configured filter is a configuration error.
pub fn init_tracing(config: &ObservabilityConfig) -> Result<(), ConfigError> {
    let filter = match EnvFilter::try_from_env(LOG_ENV_VAR) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|e| ConfigError::InvalidValue {
            field: "observability.log_level".to_string(),
            reason: e.to_string(),
        })?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);

    // Err here only means another subscriber won the race.
    let _ = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    Ok(())
}
