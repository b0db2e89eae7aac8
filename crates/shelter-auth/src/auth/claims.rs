//! Token claims and the per-request identity built from them

use serde::{Deserialize, Serialize};

use super::role::AccessRole;
use crate::types::{TenantId, UserId};

/// Access token payload.
///
/// Keys are kept short because the payload rides along on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "id")]
    pub user_id: UserId,
    #[serde(rename = "t")]
    pub tenant_id: TenantId,
    #[serde(rename = "e")]
    pub email: String,
    #[serde(rename = "r")]
    pub role: AccessRole,
    /// Expiry, seconds since epoch
    pub exp: i64,
}

/// Verified caller identity for the duration of one request.
///
/// Only constructed from verified [`Claims`] (or explicitly by callers that
/// already trust their source); the fields cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    user_id: UserId,
    tenant_id: TenantId,
    email: String,
    role: AccessRole,
}

impl Identity {
    #[must_use]
    pub fn new(
        user_id: UserId,
        tenant_id: TenantId,
        email: impl Into<String>,
        role: AccessRole,
    ) -> Self {
        Self {
            user_id,
            tenant_id,
            email: email.into(),
            role,
        }
    }

    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub const fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub const fn role(&self) -> AccessRole {
        self.role
    }
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            tenant_id: claims.tenant_id,
            email: claims.email,
            role: claims.role,
        }
    }
}
