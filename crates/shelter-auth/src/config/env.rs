//! Environment variable loading for configuration

use std::env;
use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::Algorithm;

use super::builder::ConfigBuilder;
use crate::auth::{AuthError, Result};

/// Environment variable names
mod vars {
    pub const JWT_REALM: &str = "JWT_REALM";
    pub const JWT_SECRET: &str = "JWT_SECRET";
    pub const JWT_DURATION: &str = "JWT_DURATION";
    pub const JWT_ALGORITHM: &str = "JWT_ALGORITHM";
    pub const JWT_CLOCK_SKEW_SECS: &str = "JWT_CLOCK_SKEW_SECS";
    pub const JWT_MIN_SECRET_LENGTH: &str = "JWT_MIN_SECRET_LENGTH";
    pub const SERVICE_NAME: &str = "AUTH_SERVICE_NAME";
    pub const RUST_LOG: &str = "RUST_LOG";
    pub const AUTH_JSON_LOGS: &str = "AUTH_JSON_LOGS";
}

/// Load configuration from environment variables
pub fn load_from_env(mut builder: ConfigBuilder) -> Result<ConfigBuilder> {
    if let Ok(realm) = env::var(vars::JWT_REALM) {
        builder = builder.realm(realm);
    }

    if let Ok(secret) = env::var(vars::JWT_SECRET) {
        builder = builder.secret(secret);
    }

    // Minutes
    if let Ok(duration_str) = env::var(vars::JWT_DURATION)
        && let Ok(minutes) = duration_str.parse::<u64>()
    {
        builder = builder.token_duration(Duration::from_secs(minutes.saturating_mul(60)));
    }

    if let Ok(alg) = env::var(vars::JWT_ALGORITHM) {
        builder = builder.algorithm(parse_algorithm(&alg)?);
    }

    if let Ok(skew_str) = env::var(vars::JWT_CLOCK_SKEW_SECS)
        && let Ok(secs) = skew_str.parse::<u64>()
    {
        builder = builder.clock_skew(Duration::from_secs(secs));
    }

    if let Ok(len_str) = env::var(vars::JWT_MIN_SECRET_LENGTH)
        && let Ok(len) = len_str.parse::<usize>()
    {
        builder = builder.min_secret_length(len);
    }

    if let Ok(name) = env::var(vars::SERVICE_NAME) {
        builder = builder.service_name(name);
    }

    if let Ok(level) = env::var(vars::RUST_LOG) {
        builder = builder.log_level(level);
    }

    if let Ok(val) = env::var(vars::AUTH_JSON_LOGS) {
        builder = builder.json_logs(parse_bool(&val));
    }

    Ok(builder)
}

/// Parse a signing algorithm name such as `HS256`
pub(super) fn parse_algorithm(s: &str) -> Result<Algorithm> {
    Algorithm::from_str(&s.trim().to_uppercase())
        .map_err(|_| AuthError::Config(format!("Unsupported JWT algorithm: {s}")))
}

fn parse_bool(s: &str) -> bool {
    matches!(s.to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}
