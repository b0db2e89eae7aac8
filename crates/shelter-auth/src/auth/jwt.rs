//! Access token issuance and verification

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};

use super::claims::{Claims, Identity};
use super::config::JwtConfig;
use super::error::{AuthError, Result};
use crate::constants::BEARER_PREFIX;
use crate::store::User;

/// Signed access token and the instant it stops being accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// Expiry formatted for API responses
    #[must_use]
    pub fn expires_rfc3339(&self) -> String {
        self.expires_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Mints access tokens for persisted users.
///
/// Implemented by [`TokenService`]; tests substitute their own issuer.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: &User) -> Result<IssuedToken>;
}

/// HMAC-signed bearer token service
pub struct TokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Result<Self> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // Only the configured algorithm is accepted, whatever the token header claims
        let mut validation = Validation::new(config.algorithm);
        validation.validate_aud = false;
        validation.leeway = config.clock_skew.as_secs();

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &JwtConfig {
        &self.config
    }

    /// Sign a token carrying the identity's claims
    pub fn generate_token(&self, identity: &Identity) -> Result<IssuedToken> {
        let lifetime = TimeDelta::from_std(self.config.duration)
            .map_err(|e| AuthError::SigningError(e.to_string()))?;
        let expires_at = Utc::now()
            .checked_add_signed(lifetime)
            .ok_or_else(|| AuthError::SigningError("token expiry is out of range".into()))?;

        let claims = Claims {
            user_id: identity.user_id(),
            tenant_id: identity.tenant_id(),
            email: identity.email().to_string(),
            role: identity.role(),
            exp: expires_at.timestamp(),
        };

        let token = self.sign(&claims)?;

        tracing::debug!(
            user_id = %claims.user_id,
            tenant_id = %claims.tenant_id,
            role = %claims.role,
            "Issued access token"
        );

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify the token carried in an `Authorization` header value
    pub fn parse_token(&self, authorization: &str) -> Result<Claims> {
        let token = bearer_token(authorization)?;
        self.decode(token)
    }

    /// Verify a bare compact token.
    ///
    /// A token in the configured algorithm whose `exp` has passed is
    /// [`AuthError::Expired`] even when its signature does not verify.
    pub fn decode(&self, token: &str) -> Result<Claims> {
        self.verify(token).map_err(|err| {
            tracing::debug!(error = %err, "Token rejected");
            err
        })
    }

    fn verify(&self, token: &str) -> Result<Claims> {
        let header = jsonwebtoken::decode_header(token)?;
        if header.alg != self.config.algorithm {
            return Err(AuthError::InvalidSignature);
        }

        let result = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation);
        let err = match result {
            Ok(data) => return Ok(data.claims),
            Err(err) => err,
        };

        if matches!(err.kind(), ErrorKind::InvalidSignature) && self.expired_unverified(token) {
            return Err(AuthError::Expired);
        }
        Err(err.into())
    }

    /// Expiry read from the payload without checking the signature
    fn expired_unverified(&self, token: &str) -> bool {
        let leeway = i64::try_from(self.config.clock_skew.as_secs()).unwrap_or(i64::MAX);
        jsonwebtoken::dangerous::insecure_decode::<Claims>(token)
            .is_ok_and(|data| data.claims.exp < Utc::now().timestamp().saturating_sub(leeway))
    }

    /// Verify the header and build the request identity
    pub fn authenticate_header(&self, authorization: &str) -> Result<Identity> {
        self.parse_token(authorization).map(Identity::from)
    }

    /// `WWW-Authenticate` value for rejected requests
    #[must_use]
    pub fn challenge(&self) -> String {
        format!("JWT realm=\"{}\"", self.config.realm)
    }

    fn sign(&self, claims: &Claims) -> Result<String> {
        jsonwebtoken::encode(
            &Header::new(self.config.algorithm),
            claims,
            &self.encoding_key,
        )
        .map_err(|e| AuthError::SigningError(e.to_string()))
    }
}

impl TokenIssuer for TokenService {
    fn issue(&self, user: &User) -> Result<IssuedToken> {
        self.generate_token(&user.identity())
    }
}

impl<T: TokenIssuer + ?Sized> TokenIssuer for &T {
    fn issue(&self, user: &User) -> Result<IssuedToken> {
        (**self).issue(user)
    }
}

/// Extract the token from `Bearer <token>`
fn bearer_token(authorization: &str) -> Result<&str> {
    match authorization.split_once(' ') {
        Some((scheme, token)) if scheme == BEARER_PREFIX && !token.is_empty() => Ok(token),
        _ => Err(AuthError::MalformedHeader),
    }
}
