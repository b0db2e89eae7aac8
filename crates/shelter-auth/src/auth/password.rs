//! Password hashing seam and the Argon2 implementation

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};

use super::error::{AuthError, Result};

/// Well-formed Argon2id hash with default parameters that no password is
/// expected to match. Login verifies against it when the account is unknown
/// so both paths cost one hash computation.
pub const DUMMY_PASSWORD_HASH: &str = concat!(
    "$argon2id$v=19$m=19456,t=2,p=1$CuDxTMbgDMePjREyjZZqLg$",
    "ijklKJZjoi/lSGCKk77hvKgjHiGoDisgQ5bnOJ/0Z+U"
);

/// Hashes and verifies passwords.
///
/// `matches` must compare in constant time; plain string equality is never
/// acceptable here.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String>;

    fn matches(&self, hash: &str, password: &str) -> bool;
}

/// Argon2id hasher producing PHC strings
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Storage(format!("password hashing failed: {e}")))
    }

    fn matches(&self, hash: &str, password: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            tracing::warn!("Stored password hash is not a valid PHC string");
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}
