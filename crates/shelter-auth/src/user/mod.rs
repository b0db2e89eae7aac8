//! User management gated by RBAC
//!
//! Every operation takes the caller's [`Identity`] and runs the matching
//! authorization check before reading or writing the store.

use serde::Deserialize;

use crate::auth::{
    AccessRole, AuthError, Authorizer, Identity, PasswordHasher, Result, derive_list_scope,
};
use crate::constants::MIN_PASSWORD_LENGTH;
use crate::store::{Pagination, User, UserStore};
use crate::types::{TenantId, UserId};

/// Account creation request
#[derive(Clone, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub tenant_id: TenantId,
    pub role: AccessRole,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("tenant_id", &self.tenant_id)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Contact fields to change; `None` keeps the stored value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub id: UserId,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl UserUpdate {
    fn apply(self, user: &mut User) {
        if let Some(first_name) = self.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            user.last_name = last_name;
        }
        if let Some(mobile) = self.mobile {
            user.mobile = Some(mobile);
        }
        if let Some(phone) = self.phone {
            user.phone = Some(phone);
        }
        if let Some(address) = self.address {
            user.address = Some(address);
        }
    }
}

#[derive(Debug, Clone)]
pub struct UserService<S, A, H> {
    store: S,
    rbac: A,
    hasher: H,
}

impl<S, A, H> UserService<S, A, H>
where
    S: UserStore,
    A: Authorizer,
    H: PasswordHasher,
{
    pub const fn new(store: S, rbac: A, hasher: H) -> Self {
        Self {
            store,
            rbac,
            hasher,
        }
    }

    /// Create an account with a role strictly below the caller's
    pub fn create(&self, identity: &Identity, req: NewUser) -> Result<User> {
        self.rbac.user_create(identity, req.role, req.tenant_id)?;

        if req.password != req.password_confirm {
            return Err(AuthError::Validation("passwords do not match".into()));
        }
        check_password_length(&req.password)?;

        let hash = self.hasher.hash(&req.password)?;
        let mut user = User::new(req.tenant_id, req.role, req.email, hash);
        user.first_name = req.first_name;
        user.last_name = req.last_name;
        user.mobile = req.mobile;
        user.phone = req.phone;
        user.address = req.address;

        let user = self.store.create(user)?;
        tracing::info!(
            user_id = %user.id,
            tenant_id = %user.tenant_id,
            role = %user.role,
            created_by = %identity.user_id(),
            "User created"
        );
        Ok(user)
    }

    pub fn view(&self, identity: &Identity, id: UserId) -> Result<User> {
        self.rbac.enforce_user(identity, id)?;
        Ok(self.store.view(id)?)
    }

    /// Users visible to the caller, newest first
    pub fn list(&self, identity: &Identity, page: &Pagination) -> Result<Vec<User>> {
        let scope = derive_list_scope(identity)?;
        Ok(self.store.list(&scope, page)?)
    }

    pub fn update(&self, identity: &Identity, req: UserUpdate) -> Result<User> {
        self.rbac.enforce_user(identity, req.id)?;

        let mut user = self.store.view(req.id)?;
        req.apply(&mut user);
        Ok(self.store.update(&user)?)
    }

    /// Soft-delete an account; only callers that outrank its role may do so
    pub fn delete(&self, identity: &Identity, id: UserId) -> Result<()> {
        let user = self.store.view(id)?;
        self.rbac.is_lower_role(identity, user.role)?;
        self.store.delete(&user)?;

        tracing::info!(user_id = %id, deleted_by = %identity.user_id(), "User deleted");
        Ok(())
    }

    pub fn change_password(
        &self,
        identity: &Identity,
        id: UserId,
        old_password: &str,
        new_password: &str,
    ) -> Result<()> {
        self.rbac.enforce_user(identity, id)?;

        let mut user = self.store.view(id)?;
        if !self.hasher.matches(&user.password, old_password) {
            return Err(AuthError::Validation("old password is not correct".into()));
        }
        check_password_length(new_password)?;

        user.password = self.hasher.hash(new_password)?;
        self.store.change_password(&user)?;

        tracing::info!(user_id = %id, "Password changed");
        Ok(())
    }
}

fn check_password_length(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}
