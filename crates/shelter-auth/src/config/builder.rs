//! Configuration builder

use std::time::Duration;

use jsonwebtoken::Algorithm;

use crate::auth::{JwtConfig, Result};

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub jwt: JwtConfig,
    pub telemetry: TelemetryConfig,
}

impl Config {
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    #[must_use]
    pub const fn jwt(&self) -> &JwtConfig {
        &self.jwt
    }

    #[must_use]
    pub const fn telemetry(&self) -> &TelemetryConfig {
        &self.telemetry
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub log_level: String,
    pub json_logs: bool,
}

/// Configuration builder with fluent API
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    jwt: JwtConfig,
    telemetry: TelemetryConfig,
}

impl ConfigBuilder {
    const DEFAULT_SERVICE_NAME: &'static str = "shelter-auth";
    const DEFAULT_LOG_LEVEL: &'static str = "info";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn realm(mut self, realm: String) -> Self {
        self.jwt.realm = realm;
        self
    }

    #[must_use]
    pub fn secret(mut self, secret: String) -> Self {
        self.jwt.secret = secret;
        self
    }

    #[must_use]
    pub const fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.jwt.algorithm = algorithm;
        self
    }

    /// Access token lifetime
    #[must_use]
    pub const fn token_duration(mut self, duration: Duration) -> Self {
        self.jwt.duration = duration;
        self
    }

    #[must_use]
    pub const fn clock_skew(mut self, skew: Duration) -> Self {
        self.jwt.clock_skew = skew;
        self
    }

    #[must_use]
    pub const fn min_secret_length(mut self, len: usize) -> Self {
        self.jwt.min_secret_length = len;
        self
    }

    #[must_use]
    pub fn service_name(mut self, name: String) -> Self {
        self.telemetry.service_name = name;
        self
    }

    #[must_use]
    pub fn log_level(mut self, level: String) -> Self {
        self.telemetry.log_level = level;
        self
    }

    #[must_use]
    pub const fn json_logs(mut self, enabled: bool) -> Self {
        self.telemetry.json_logs = enabled;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        self.jwt.validate()?;

        let service_name = if self.telemetry.service_name.is_empty() {
            Self::DEFAULT_SERVICE_NAME.to_string()
        } else {
            self.telemetry.service_name
        };

        let log_level = if self.telemetry.log_level.is_empty() {
            Self::DEFAULT_LOG_LEVEL.to_string()
        } else {
            self.telemetry.log_level
        };

        Ok(Config {
            jwt: self.jwt,
            telemetry: TelemetryConfig {
                service_name,
                log_level,
                json_logs: self.telemetry.json_logs,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthError;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_builder_requires_secret() {
        let result = ConfigBuilder::new().build();
        assert!(matches!(result, Err(AuthError::Config(_))));
    }

    #[test]
    fn test_builder_defaults() {
        let config = ConfigBuilder::new()
            .secret(SECRET.to_string())
            .build()
            .unwrap();

        assert_eq!(config.jwt.realm, "shelter-auth");
        assert_eq!(config.jwt.algorithm, Algorithm::HS256);
        assert_eq!(config.jwt.duration, Duration::from_secs(900));
        assert_eq!(config.telemetry.service_name, "shelter-auth");
        assert_eq!(config.telemetry.log_level, "info");
        assert!(!config.telemetry.json_logs);
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::builder()
            .secret(SECRET.to_string())
            .realm("shelters".to_string())
            .algorithm(Algorithm::HS384)
            .token_duration(Duration::from_secs(60))
            .clock_skew(Duration::from_secs(10))
            .service_name("api".to_string())
            .log_level("debug".to_string())
            .json_logs(true)
            .build()
            .unwrap();

        assert_eq!(config.jwt().realm, "shelters");
        assert_eq!(config.jwt().algorithm, Algorithm::HS384);
        assert_eq!(config.jwt().duration, Duration::from_secs(60));
        assert_eq!(config.jwt().clock_skew, Duration::from_secs(10));
        assert_eq!(config.telemetry().service_name, "api");
        assert_eq!(config.telemetry().log_level, "debug");
        assert!(config.telemetry().json_logs);
    }

    #[test]
    fn test_builder_min_secret_length() {
        let result = ConfigBuilder::new()
            .secret("sixteen-bytes-ok".to_string())
            .build();
        assert!(result.is_err());

        let config = ConfigBuilder::new()
            .secret("sixteen-bytes-ok".to_string())
            .min_secret_length(16)
            .build()
            .unwrap();
        assert_eq!(config.jwt.min_secret_length, 16);
    }

    #[test]
    fn test_builder_rejects_zero_duration() {
        let result = ConfigBuilder::new()
            .secret(SECRET.to_string())
            .token_duration(Duration::ZERO)
            .build();
        assert!(result.is_err());
    }
}
