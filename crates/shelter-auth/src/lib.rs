//! Token issuance and role/tenant authorization for multi-tenant REST backends
//!
//! The crate verifies bearer tokens, mints access and refresh tokens, and
//! decides whether a caller may act on a user or tenant. Persistence and
//! password hashing sit behind the [`UserStore`] and [`PasswordHasher`]
//! traits; an in-memory store and an Argon2 hasher are provided.

pub mod auth;
pub mod config;
mod constants;
pub mod observability;
pub mod store;
pub mod types;
pub mod user;

pub use auth::{
    AccessRole, Argon2Hasher, AuthError, AuthService, AuthToken, Authorizer, Claims, Identity,
    IssuedToken, JwtConfig, ListScope, PasswordHasher, Privilege, RbacEnforcer, Result,
    TokenIssuer, TokenService, derive_list_scope,
};
pub use config::{Config, ConfigBuilder, TelemetryConfig, load_config, load_config_from_path};
pub use store::{MemoryUserStore, Pagination, StoreError, StoreResult, User, UserStore};
pub use types::*;
pub use user::{NewUser, UserService, UserUpdate};
