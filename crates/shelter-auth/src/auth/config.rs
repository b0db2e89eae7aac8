//! Token signing configuration

use std::time::Duration;

use jsonwebtoken::Algorithm;

use super::error::{AuthError, Result};
use crate::constants::{
    DEFAULT_ACCESS_TOKEN_MINUTES, DEFAULT_REALM, MAX_ACCESS_TOKEN_MINUTES, MIN_SECRET_LENGTH,
};

/// Access token signing and verification settings
#[derive(Clone)]
pub struct JwtConfig {
    /// Realm reported in `WWW-Authenticate` challenges
    pub realm: String,
    /// Shared secret for HMAC signing
    pub secret: String,
    /// Signing algorithm, fixed per deployment
    pub algorithm: Algorithm,
    /// Lifetime of an access token
    pub duration: Duration,
    /// Tolerance applied to `exp` validation
    pub clock_skew: Duration,
    /// Shortest secret accepted by [`JwtConfig::validate`]
    pub min_secret_length: usize,
}

// Secret never appears in debug output
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("realm", &self.realm)
            .field("algorithm", &self.algorithm)
            .field("duration", &self.duration)
            .field("clock_skew", &self.clock_skew)
            .field("min_secret_length", &self.min_secret_length)
            .finish_non_exhaustive()
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            realm: DEFAULT_REALM.to_string(),
            secret: String::new(),
            algorithm: Algorithm::HS256,
            duration: Duration::from_secs(DEFAULT_ACCESS_TOKEN_MINUTES * 60),
            clock_skew: Duration::ZERO,
            min_secret_length: MIN_SECRET_LENGTH,
        }
    }
}

impl JwtConfig {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = realm.into();
        self
    }

    #[must_use]
    pub const fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub const fn with_clock_skew(mut self, clock_skew: Duration) -> Self {
        self.clock_skew = clock_skew;
        self
    }

    #[must_use]
    pub const fn with_min_secret_length(mut self, min_secret_length: usize) -> Self {
        self.min_secret_length = min_secret_length;
        self
    }

    /// Reject settings that could never produce a usable token
    pub fn validate(&self) -> Result<()> {
        if self.secret.is_empty() {
            return Err(AuthError::Config("JWT secret is required".into()));
        }
        if self.secret.len() < self.min_secret_length {
            return Err(AuthError::Config(format!(
                "JWT secret must be at least {} bytes",
                self.min_secret_length
            )));
        }
        if self.duration.is_zero() {
            return Err(AuthError::Config("JWT duration must be greater than zero".into()));
        }
        if self.duration > Duration::from_secs(MAX_ACCESS_TOKEN_MINUTES * 60) {
            return Err(AuthError::Config(format!(
                "JWT duration must not exceed {MAX_ACCESS_TOKEN_MINUTES} minutes"
            )));
        }
        Ok(())
    }
}
