//! Login, refresh and current-user operations

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use super::claims::Identity;
use super::error::{AuthError, Result};
use super::jwt::{IssuedToken, TokenIssuer};
use super::password::{DUMMY_PASSWORD_HASH, PasswordHasher};
use crate::store::{User, UserStore};

/// Result of a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub refresh_token: String,
}

impl AuthToken {
    #[must_use]
    pub fn expires_rfc3339(&self) -> String {
        self.expires_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Authentication service over the user store, token issuer and hasher
#[derive(Debug, Clone)]
pub struct AuthService<S, T, H> {
    store: S,
    issuer: T,
    hasher: H,
}

impl<S, T, H> AuthService<S, T, H>
where
    S: UserStore,
    T: TokenIssuer,
    H: PasswordHasher,
{
    pub const fn new(store: S, issuer: T, hasher: H) -> Self {
        Self {
            store,
            issuer,
            hasher,
        }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Verify credentials and open a session.
    ///
    /// Unknown accounts and wrong passwords both yield
    /// [`AuthError::InvalidCredentials`]. On success the refresh token is
    /// rotated and the last login stamped before the record is persisted.
    pub fn authenticate(&self, identifier: &str, password: &str) -> Result<AuthToken> {
        let Some(mut user) = self.store.find_by_email(identifier)? else {
            // Same hashing cost as a known account with a wrong password
            let _ = self.hasher.matches(DUMMY_PASSWORD_HASH, password);
            tracing::warn!(reason = "unknown_account", "Login rejected");
            record_login("invalid_credentials");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.matches(&user.password, password) {
            tracing::warn!(user_id = %user.id, reason = "password_mismatch", "Login rejected");
            record_login("invalid_credentials");
            return Err(AuthError::InvalidCredentials);
        }

        if !user.active {
            tracing::warn!(user_id = %user.id, reason = "inactive", "Login rejected");
            record_login("inactive");
            return Err(AuthError::InactiveAccount);
        }

        let issued = self.issuer.issue(&user)?;
        let refresh_token = new_refresh_token();

        user.update_last_login();
        user.refresh_token = Some(refresh_token.clone());
        self.store.update(&user)?;

        tracing::info!(
            user_id = %user.id,
            tenant_id = %user.tenant_id,
            role = %user.role,
            "User logged in"
        );
        record_login("success");

        Ok(AuthToken {
            token: issued.token,
            expires_at: issued.expires_at,
            refresh_token,
        })
    }

    /// Mint a new access token for the owner of `refresh_token`.
    ///
    /// Claims reflect the owner's current persisted role and tenant. The
    /// refresh token itself is left unchanged.
    pub fn refresh(&self, refresh_token: &str) -> Result<IssuedToken> {
        let Some(user) = self.store.find_by_refresh_token(refresh_token)? else {
            tracing::warn!("Refresh token not recognized");
            return Err(AuthError::NotFound);
        };

        let issued = self.issuer.issue(&user)?;
        tracing::debug!(user_id = %user.id, "Access token refreshed");
        #[cfg(feature = "metrics")]
        crate::observability::record_refresh();
        Ok(issued)
    }

    /// Current record of the caller
    pub fn me(&self, identity: &Identity) -> Result<User> {
        Ok(self.store.view(identity.user_id())?)
    }
}

fn new_refresh_token() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg_attr(not(feature = "metrics"), allow(unused_variables))]
fn record_login(outcome: &'static str) {
    #[cfg(feature = "metrics")]
    crate::observability::record_login(outcome);
}
