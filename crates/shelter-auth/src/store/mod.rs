//! User records and the storage seam the core reads them through

mod memory;
mod pagination;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use memory::MemoryUserStore;
pub use pagination::Pagination;

use crate::auth::{AccessRole, Identity, ListScope};
use crate::types::{TenantId, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("backend failure: {0}")]
    Backend(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Persisted account.
///
/// Owned by the data layer. The core reads role, tenant, password hash and
/// the active flag, and writes the refresh token and last login time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub tenant_id: TenantId,
    pub role: AccessRole,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub active: bool,
    #[serde(skip_serializing, default)]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// New active account; the store assigns the id on create
    #[must_use]
    pub fn new(
        tenant_id: TenantId,
        role: AccessRole,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UserId(0),
            tenant_id,
            role,
            first_name: String::new(),
            last_name: String::new(),
            email: email.into(),
            mobile: None,
            phone: None,
            address: None,
            password: password_hash.into(),
            active: true,
            refresh_token: None,
            last_login: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Claims this account would carry if a token were minted now
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity::new(self.id, self.tenant_id, self.email.clone(), self.role)
    }

    pub fn update_last_login(&mut self) {
        self.last_login = Some(Utc::now());
    }

    pub fn soft_delete(&mut self) {
        self.deleted_at = Some(Utc::now());
    }

    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// User persistence collaborator.
///
/// Soft-deleted records are invisible to every lookup.
pub trait UserStore: Send + Sync {
    /// Insert a new record and return it with its assigned id
    fn create(&self, user: User) -> StoreResult<User>;

    fn view(&self, id: UserId) -> StoreResult<User>;

    fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    fn find_by_refresh_token(&self, token: &str) -> StoreResult<Option<User>>;

    /// Records visible under `scope`, newest id first
    fn list(&self, scope: &ListScope, page: &Pagination) -> StoreResult<Vec<User>>;

    fn update(&self, user: &User) -> StoreResult<User>;

    fn change_password(&self, user: &User) -> StoreResult<()>;

    fn delete(&self, user: &User) -> StoreResult<()>;
}
