//! Defaults and limits

/// Realm used in `WWW-Authenticate` when none is configured
pub const DEFAULT_REALM: &str = "shelter-auth";

/// Access token lifetime when none is configured
pub const DEFAULT_ACCESS_TOKEN_MINUTES: u64 = 15;

/// Longest access token lifetime accepted by configuration (one leap year)
pub const MAX_ACCESS_TOKEN_MINUTES: u64 = 366 * 24 * 60;

/// Shortest HMAC secret accepted by configuration
pub const MIN_SECRET_LENGTH: usize = 32;

/// Authorization header scheme
pub const BEARER_PREFIX: &str = "Bearer";

/// Page size used when the caller asks for less than one row
pub const DEFAULT_PAGE_LIMIT: i64 = 100;

/// Largest page size a caller may request
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Shortest password accepted for new accounts and password changes
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Column the tenant list scope restricts on
pub const TENANT_SCOPE_PREDICATE: &str = "tenant_id = ?";
