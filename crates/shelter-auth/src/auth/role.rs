//! Access role hierarchy

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::AuthError;

/// Access levels, most privileged first.
///
/// Roles travel inside tokens and user records as their ordinal. A lower
/// ordinal means more privilege, so `SuperAdmin` (1) outranks `StandardUser`
/// (4). Callers compare roles through [`AccessRole::compare`] and the
/// `*_privileged_*` helpers, never through the raw numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum AccessRole {
    /// Unrestricted access across all tenants
    SuperAdmin = 1,
    /// Platform administrator, bypasses tenant ownership checks
    Admin = 2,
    /// Administers a single tenant (shelter)
    TenantAdmin = 3,
    /// Regular account, may only act on its own record
    StandardUser = 4,
}

/// Result of comparing the privilege of two roles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
    Higher,
    Equal,
    Lower,
}

impl AccessRole {
    pub const ALL: [Self; 4] = [
        Self::SuperAdmin,
        Self::Admin,
        Self::TenantAdmin,
        Self::StandardUser,
    ];

    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            1 => Some(Self::SuperAdmin),
            2 => Some(Self::Admin),
            3 => Some(Self::TenantAdmin),
            4 => Some(Self::StandardUser),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::TenantAdmin => "tenant_admin",
            Self::StandardUser => "standard_user",
        }
    }

    /// Privilege of `self` relative to `other`
    #[must_use]
    pub const fn compare(self, other: Self) -> Privilege {
        let (a, b) = (self.ordinal(), other.ordinal());
        if a < b {
            Privilege::Higher
        } else if a == b {
            Privilege::Equal
        } else {
            Privilege::Lower
        }
    }

    #[must_use]
    pub const fn at_least_as_privileged_as(self, other: Self) -> bool {
        !matches!(self.compare(other), Privilege::Lower)
    }

    #[must_use]
    pub const fn strictly_more_privileged_than(self, other: Self) -> bool {
        matches!(self.compare(other), Privilege::Higher)
    }

    /// Admin or `SuperAdmin`
    #[must_use]
    pub const fn is_admin(self) -> bool {
        self.at_least_as_privileged_as(Self::Admin)
    }
}

impl fmt::Display for AccessRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<AccessRole> for u8 {
    fn from(role: AccessRole) -> Self {
        role.ordinal()
    }
}

impl TryFrom<u8> for AccessRole {
    type Error = AuthError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_ordinal(value)
            .ok_or_else(|| AuthError::Validation(format!("unknown access role ordinal: {value}")))
    }
}

impl FromStr for AccessRole {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "super_admin" | "superadmin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            "tenant_admin" | "shelter_admin" => Ok(Self::TenantAdmin),
            "standard_user" | "user" | "adopter" => Ok(Self::StandardUser),
            other => Err(AuthError::Validation(format!("unknown access role: {other}"))),
        }
    }
}
