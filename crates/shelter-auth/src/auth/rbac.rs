//! Role-based access control

use super::claims::Identity;
use super::error::{AuthError, Result};
use super::role::AccessRole;
use crate::types::{TenantId, UserId};

/// Authorization decisions consulted before acting on a resource.
///
/// Every check is a pure function of its arguments and fails with
/// [`AuthError::Forbidden`] only.
pub trait Authorizer: Send + Sync {
    /// Caller's role is at least as privileged as `required`
    fn enforce_role(&self, identity: &Identity, required: AccessRole) -> Result<()>;

    /// Caller is an admin or is the target user
    fn enforce_user(&self, identity: &Identity, target: UserId) -> Result<()>;

    /// Caller is an admin, or a tenant admin of the target tenant
    fn enforce_tenant(&self, identity: &Identity, target: TenantId) -> Result<()>;

    /// Caller may create an account with the given role
    fn user_create(
        &self,
        identity: &Identity,
        role: AccessRole,
        tenant_id: TenantId,
    ) -> Result<()>;

    /// Caller's role strictly outranks `target`
    fn is_lower_role(&self, identity: &Identity, target: AccessRole) -> Result<()>;
}

/// Production authorizer over the fixed role hierarchy
#[derive(Debug, Clone, Copy, Default)]
pub struct RbacEnforcer;

impl RbacEnforcer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn check(allowed: bool, identity: &Identity, check: &'static str) -> Result<()> {
    if allowed {
        return Ok(());
    }
    tracing::warn!(
        user_id = %identity.user_id(),
        role = %identity.role(),
        check,
        "RBAC check failed"
    );
    #[cfg(feature = "metrics")]
    crate::observability::record_denial(check);
    Err(AuthError::Forbidden)
}

impl Authorizer for RbacEnforcer {
    fn enforce_role(&self, identity: &Identity, required: AccessRole) -> Result<()> {
        check(
            identity.role().at_least_as_privileged_as(required),
            identity,
            "enforce_role",
        )
    }

    // TODO: let tenant admins through for users of their own tenant once the
    // store lookup for the target's tenant is wired in.
    fn enforce_user(&self, identity: &Identity, target: UserId) -> Result<()> {
        check(
            identity.role().is_admin() || identity.user_id() == target,
            identity,
            "enforce_user",
        )
    }

    fn enforce_tenant(&self, identity: &Identity, target: TenantId) -> Result<()> {
        if identity.role().is_admin() {
            return Ok(());
        }
        self.enforce_role(identity, AccessRole::TenantAdmin)?;
        check(identity.tenant_id() == target, identity, "enforce_tenant")
    }

    fn user_create(
        &self,
        identity: &Identity,
        role: AccessRole,
        _tenant_id: TenantId,
    ) -> Result<()> {
        // Tenant of the new account is not checked, only relative rank
        self.is_lower_role(identity, role)
    }

    fn is_lower_role(&self, identity: &Identity, target: AccessRole) -> Result<()> {
        check(
            identity.role().strictly_more_privileged_than(target),
            identity,
            "is_lower_role",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(id: i64, tenant: i64, role: AccessRole) -> Identity {
        Identity::new(UserId(id), TenantId(tenant), "john@mail.com", role)
    }

    const fn rank(role: AccessRole) -> u8 {
        role.ordinal()
    }

    #[test]
    fn test_enforce_role_all_pairs() {
        let rbac = RbacEnforcer::new();
        for actor in AccessRole::ALL {
            for required in AccessRole::ALL {
                let result = rbac.enforce_role(&identity(1, 1, actor), required);
                assert_eq!(
                    result.is_ok(),
                    rank(actor) <= rank(required),
                    "{actor} vs {required}"
                );
            }
        }
    }

    #[test]
    fn test_enforce_role_not_authorized() {
        let rbac = RbacEnforcer::new();
        let result = rbac.enforce_role(
            &identity(1, 1, AccessRole::TenantAdmin),
            AccessRole::SuperAdmin,
        );
        assert!(matches!(result, Err(AuthError::Forbidden)));
    }

    #[test]
    fn test_enforce_user_not_same_user_not_admin() {
        let rbac = RbacEnforcer::new();
        let result = rbac.enforce_user(&identity(15, 1, AccessRole::TenantAdmin), UserId(122));
        assert!(matches!(result, Err(AuthError::Forbidden)));
    }

    #[test]
    fn test_enforce_user_admin_bypass() {
        let rbac = RbacEnforcer::new();
        for role in [AccessRole::SuperAdmin, AccessRole::Admin] {
            assert!(rbac.enforce_user(&identity(22, 1, role), UserId(44)).is_ok());
        }
    }

    #[test]
    fn test_enforce_user_same_user() {
        let rbac = RbacEnforcer::new();
        for role in AccessRole::ALL {
            assert!(rbac.enforce_user(&identity(8, 1, role), UserId(8)).is_ok());
        }
    }

    #[test]
    fn test_enforce_tenant_admins_always_allowed() {
        let rbac = RbacEnforcer::new();
        for role in [AccessRole::SuperAdmin, AccessRole::Admin] {
            for target in [1, 5, 6, 1000] {
                assert!(rbac.enforce_tenant(&identity(1, 5, role), TenantId(target)).is_ok());
            }
        }
    }

    #[test]
    fn test_enforce_tenant_tenant_admin() {
        let rbac = RbacEnforcer::new();
        let admin = identity(1, 5, AccessRole::TenantAdmin);
        assert!(rbac.enforce_tenant(&admin, TenantId(5)).is_ok());
        assert!(matches!(
            rbac.enforce_tenant(&admin, TenantId(6)),
            Err(AuthError::Forbidden)
        ));
    }

    #[test]
    fn test_enforce_tenant_standard_user_below_floor() {
        let rbac = RbacEnforcer::new();
        let user = identity(1, 5, AccessRole::StandardUser);
        assert!(matches!(
            rbac.enforce_tenant(&user, TenantId(5)),
            Err(AuthError::Forbidden)
        ));
    }

    #[test]
    fn test_is_lower_role_all_pairs() {
        let rbac = RbacEnforcer::new();
        for actor in AccessRole::ALL {
            for target in AccessRole::ALL {
                let result = rbac.is_lower_role(&identity(1, 1, actor), target);
                assert_eq!(
                    result.is_ok(),
                    rank(actor) < rank(target),
                    "{actor} vs {target}"
                );
            }
        }
    }

    #[test]
    fn test_is_lower_role_equal_denied() {
        let rbac = RbacEnforcer::new();
        let result = rbac.is_lower_role(&identity(1, 1, AccessRole::Admin), AccessRole::Admin);
        assert!(matches!(result, Err(AuthError::Forbidden)));
    }

    #[test]
    fn test_user_create_checks_rank_only() {
        let rbac = RbacEnforcer::new();
        let tenant_admin = identity(1, 5, AccessRole::TenantAdmin);

        assert!(
            rbac.user_create(&tenant_admin, AccessRole::StandardUser, TenantId(5))
                .is_ok()
        );
        // Another tenant is accepted as long as the rank is lower
        assert!(
            rbac.user_create(&tenant_admin, AccessRole::StandardUser, TenantId(99))
                .is_ok()
        );
        assert!(
            rbac.user_create(&tenant_admin, AccessRole::TenantAdmin, TenantId(5))
                .is_err()
        );
        assert!(
            rbac.user_create(&tenant_admin, AccessRole::Admin, TenantId(5))
                .is_err()
        );
    }

    #[test]
    fn test_decisions_are_deterministic() {
        let rbac = RbacEnforcer::new();
        let caller = identity(3, 5, AccessRole::TenantAdmin);
        let first = rbac.enforce_tenant(&caller, TenantId(6)).is_ok();
        for _ in 0..10 {
            assert_eq!(rbac.enforce_tenant(&caller, TenantId(6)).is_ok(), first);
        }
    }
}
