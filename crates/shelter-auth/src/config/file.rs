//! TOML configuration file loading

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::builder::ConfigBuilder;
use super::env::parse_algorithm;
use crate::auth::{AuthError, Result};

/// Configuration file locations checked in order
const CONFIG_PATHS: &[&str] = &[
    "./shelter-auth.toml",
    "~/.config/shelter-auth/config.toml",
    "/etc/shelter-auth/config.toml",
];

/// Find the first existing configuration file
pub fn find_config_file() -> Option<PathBuf> {
    for path_str in CONFIG_PATHS {
        let path = if path_str.starts_with('~') {
            if let Ok(home) = std::env::var("HOME") {
                PathBuf::from(path_str.replacen('~', &home, 1))
            } else {
                continue;
            }
        } else {
            PathBuf::from(path_str)
        };

        if path.exists() {
            return Some(path);
        }
    }
    None
}

/// Load configuration from a TOML file
pub fn load_from_file(path: &Path, builder: ConfigBuilder) -> Result<ConfigBuilder> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AuthError::Config(format!(
            "Failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;

    let file_config: FileConfig = toml::from_str(&content).map_err(|e| {
        AuthError::Config(format!(
            "Failed to parse config file {}: {}",
            path.display(),
            e
        ))
    })?;

    apply_file_config(builder, file_config)
}

fn apply_file_config(mut builder: ConfigBuilder, config: FileConfig) -> Result<ConfigBuilder> {
    if let Some(jwt) = config.jwt {
        if let Some(realm) = jwt.realm {
            builder = builder.realm(realm);
        }

        if let Some(secret) = jwt.secret {
            builder = builder.secret(secret);
        }

        if let Some(minutes) = jwt.duration_minutes {
            builder = builder.token_duration(Duration::from_secs(minutes.saturating_mul(60)));
        }

        if let Some(alg) = jwt.algorithm {
            builder = builder.algorithm(parse_algorithm(&alg)?);
        }

        if let Some(secs) = jwt.clock_skew_secs {
            builder = builder.clock_skew(Duration::from_secs(secs));
        }

        if let Some(len) = jwt.min_secret_length {
            builder = builder.min_secret_length(len);
        }
    }

    if let Some(obs) = config.observability {
        if let Some(name) = obs.service_name {
            builder = builder.service_name(name);
        }

        if let Some(level) = obs.log_level {
            builder = builder.log_level(level);
        }

        if let Some(json) = obs.json_logs {
            builder = builder.json_logs(json);
        }
    }

    Ok(builder)
}

/// Root configuration file structure
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    jwt: Option<JwtFileConfig>,
    observability: Option<ObservabilityConfig>,
}

#[derive(Deserialize)]
struct JwtFileConfig {
    realm: Option<String>,
    secret: Option<String>,
    duration_minutes: Option<u64>,
    algorithm: Option<String>,
    clock_skew_secs: Option<u64>,
    min_secret_length: Option<usize>,
}

impl std::fmt::Debug for JwtFileConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtFileConfig")
            .field("realm", &self.realm)
            .field("duration_minutes", &self.duration_minutes)
            .field("algorithm", &self.algorithm)
            .field("clock_skew_secs", &self.clock_skew_secs)
            .field("min_secret_length", &self.min_secret_length)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct ObservabilityConfig {
    service_name: Option<String>,
    log_level: Option<String>,
    json_logs: Option<bool>,
}
