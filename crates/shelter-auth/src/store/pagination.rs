//! Page window for list queries

use crate::auth::{AuthError, Result};
use crate::constants::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    limit: usize,
    offset: usize,
}

impl Pagination {
    /// Build from request parameters; pages are zero-based.
    ///
    /// A limit below one falls back to the default page size and a limit above
    /// the maximum is clamped. A negative page is rejected.
    pub fn new(limit: i64, page: i64) -> Result<Self> {
        if page < 0 {
            return Err(AuthError::Validation(format!(
                "page must not be negative, got {page}"
            )));
        }

        let limit = if limit < 1 {
            DEFAULT_PAGE_LIMIT
        } else {
            limit.min(MAX_PAGE_LIMIT)
        };

        let offset = page
            .checked_mul(limit)
            .ok_or_else(|| AuthError::Validation(format!("page {page} is out of range")))?;

        Ok(Self {
            limit: limit as usize,
            offset: offset as usize,
        })
    }

    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT as usize,
            offset: 0,
        }
    }
}
