//! Logging and metrics setup

#[cfg(feature = "metrics")]
mod metrics;

#[cfg(feature = "metrics")]
pub use metrics::{init_metrics, record_denial, record_login, record_refresh, render_metrics};

use crate::auth::{AuthError, Result};
use crate::config::TelemetryConfig;

/// Initialize logging and, with the `metrics` feature, the Prometheus recorder
pub fn init_observability(config: &TelemetryConfig) -> Result<()> {
    #[cfg(feature = "metrics")]
    {
        init_metrics()?;
    }

    init_logging(config)
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `config.log_level` when set. Fails if a global
/// subscriber is already installed.
pub fn init_logging(config: &TelemetryConfig) -> Result<()> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{EnvFilter, Layer};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer().with_target(true).boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| AuthError::Config(format!("Failed to install log subscriber: {e}")))?;

    tracing::info!(service = %config.service_name, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice_fails() {
        let config = TelemetryConfig {
            service_name: "test".to_string(),
            log_level: "warn".to_string(),
            json_logs: false,
        };

        // Whichever call runs first in this process owns the global subscriber
        let _ = init_logging(&config);
        let err = init_logging(&config).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_telemetry_config_default() {
        let config = TelemetryConfig::default();
        assert!(config.service_name.is_empty());
        assert!(config.log_level.is_empty());
        assert!(!config.json_logs);
    }
}
