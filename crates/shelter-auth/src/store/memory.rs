//! In-memory user store

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;

use super::{Pagination, StoreError, StoreResult, User, UserStore};
use crate::auth::ListScope;
use crate::types::UserId;

#[derive(Default)]
struct Inner {
    users: BTreeMap<UserId, User>,
    next_id: i64,
}

impl Inner {
    fn live(&self) -> impl DoubleEndedIterator<Item = &User> {
        self.users.values().filter(|user| !user.is_deleted())
    }

    fn live_mut(&mut self, id: UserId) -> StoreResult<&mut User> {
        self.users
            .get_mut(&id)
            .filter(|user| !user.is_deleted())
            .ok_or(StoreError::NotFound)
    }
}

/// Thread-safe user store backed by a `BTreeMap`.
///
/// Clones share the same records. Ids are assigned sequentially from 1 and
/// deleted records stay in the map with `deleted_at` set.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    inner: Arc<RwLock<Inner>>,
}

impl std::fmt::Debug for MemoryUserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryUserStore")
            .field("user_count", &self.inner.read().users.len())
            .finish_non_exhaustive()
    }
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records that are not soft-deleted
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().live().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UserStore for MemoryUserStore {
    fn create(&self, mut user: User) -> StoreResult<User> {
        let mut inner = self.inner.write();

        if inner
            .live()
            .any(|existing| existing.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(StoreError::Conflict(format!(
                "email {} is already registered",
                user.email
            )));
        }

        inner.next_id += 1;
        user.id = UserId(inner.next_id);
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn view(&self, id: UserId) -> StoreResult<User> {
        self.inner
            .read()
            .users
            .get(&id)
            .filter(|user| !user.is_deleted())
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self
            .inner
            .read()
            .live()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    fn find_by_refresh_token(&self, token: &str) -> StoreResult<Option<User>> {
        if token.is_empty() {
            return Ok(None);
        }
        Ok(self
            .inner
            .read()
            .live()
            .find(|user| user.refresh_token.as_deref() == Some(token))
            .cloned())
    }

    fn list(&self, scope: &ListScope, page: &Pagination) -> StoreResult<Vec<User>> {
        Ok(self
            .inner
            .read()
            .live()
            .rev()
            .filter(|user| scope.permits(user.tenant_id))
            .skip(page.offset())
            .take(page.limit())
            .cloned()
            .collect())
    }

    fn update(&self, user: &User) -> StoreResult<User> {
        let mut inner = self.inner.write();
        let stored = inner.live_mut(user.id)?;
        *stored = user.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    fn change_password(&self, user: &User) -> StoreResult<()> {
        let mut inner = self.inner.write();
        let stored = inner.live_mut(user.id)?;
        stored.password.clone_from(&user.password);
        stored.updated_at = Utc::now();
        Ok(())
    }

    fn delete(&self, user: &User) -> StoreResult<()> {
        let mut inner = self.inner.write();
        let stored = inner.live_mut(user.id)?;
        stored.soft_delete();
        stored.refresh_token = None;
        Ok(())
    }
}
