//! Tenant scoping for list queries

use super::claims::Identity;
use super::error::{AuthError, Result};
use super::role::AccessRole;
use crate::constants::TENANT_SCOPE_PREDICATE;
use crate::types::TenantId;

/// Row restriction the data layer applies to collection reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// No restriction
    Unrestricted,
    /// Only rows owned by the tenant
    Tenant(TenantId),
}

impl ListScope {
    /// Predicate fragment and its bound value, for SQL-backed stores
    #[must_use]
    pub const fn predicate(&self) -> Option<(&'static str, TenantId)> {
        match self {
            Self::Unrestricted => None,
            Self::Tenant(id) => Some((TENANT_SCOPE_PREDICATE, *id)),
        }
    }

    /// Whether a row owned by `tenant_id` is visible under this scope
    #[must_use]
    pub fn permits(&self, tenant_id: TenantId) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Tenant(id) => *id == tenant_id,
        }
    }
}

/// Scope for listing collections on behalf of `identity`.
///
/// Admins see everything, tenant admins see their own tenant, and standard
/// users may not list at all.
pub fn derive_list_scope(identity: &Identity) -> Result<ListScope> {
    match identity.role() {
        role if role.is_admin() => Ok(ListScope::Unrestricted),
        AccessRole::TenantAdmin => Ok(ListScope::Tenant(identity.tenant_id())),
        role => {
            tracing::warn!(
                user_id = %identity.user_id(),
                role = %role,
                "List scope denied"
            );
            #[cfg(feature = "metrics")]
            crate::observability::record_denial("list_scope");
            Err(AuthError::Forbidden)
        }
    }
}
