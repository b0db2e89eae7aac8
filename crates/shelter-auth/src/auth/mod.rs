//! Authentication and authorization
//!
//! Token issuance and verification, the role hierarchy, RBAC checks and the
//! tenant scoping applied to list queries.
//!
//! # Flow
//!
//! 1. [`AuthService::authenticate`] verifies credentials and returns an access
//!    token plus a rotated refresh token.
//! 2. Each request carries `Authorization: Bearer <token>`;
//!    [`TokenService::authenticate_header`] turns it into an [`Identity`].
//! 3. Handlers pass the identity to an [`Authorizer`] or to
//!    [`derive_list_scope`] before touching data.

mod claims;
mod config;
mod error;
mod jwt;
mod password;
mod rbac;
mod role;
mod scope;
mod service;

pub use claims::{Claims, Identity};
pub use config::JwtConfig;
pub use error::{AuthError, Result};
pub use jwt::{IssuedToken, TokenIssuer, TokenService};
pub use password::{Argon2Hasher, PasswordHasher};
pub use rbac::{Authorizer, RbacEnforcer};
pub use role::{AccessRole, Privilege};
pub use scope::{ListScope, derive_list_scope};
pub use service::{AuthService, AuthToken};
