//! Signed session tokens (HS256 JWT).

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::claims::{SessionClaims, TokenValidationError, validate_claims};
use crate::User;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed or unsigned token: {0}")]
    Malformed(String),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),

    #[error("session has been logged out")]
    Revoked,

    #[error("failed to sign token: {0}")]
    Signing(String),
}

pub trait SessionTokens: Send + Sync {
    fn issue(&self, user: &User, now: DateTime<Utc>) -> Result<(String, SessionClaims), TokenError>;

    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenError>;

    /// Invalidate a session before it expires.
    fn revoke(&self, claims: &SessionClaims, now: DateTime<Utc>);
}

pub struct Hs256SessionTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    /// Revoked `jti` → the token's own expiry. Entries past their expiry are
    /// dropped on the next revoke; the token is rejected as expired anyway.
    revoked: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl Hs256SessionTokens {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
            revoked: RwLock::new(HashMap::new()),
        }
    }

    fn validation() -> Validation {
        // Expiry lives in our own `expires_at` claim and is checked by
        // `validate_claims`, so the registered-claim checks are off.
        let mut v = Validation::new(Algorithm::HS256);
        v.required_spec_claims.clear();
        v.validate_exp = false;
        v
    }
}

impl SessionTokens for Hs256SessionTokens {
    fn issue(&self, user: &User, now: DateTime<Utc>) -> Result<(String, SessionClaims), TokenError> {
        let claims = SessionClaims::for_user(user, now, self.ttl);
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))?;
        Ok((token, claims))
    }

    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenError> {
        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &Self::validation())
            .map_err(|e| TokenError::Malformed(e.to_string()))?;
        let claims = data.claims;
        validate_claims(&claims, now)?;

        let revoked = self.revoked.read().unwrap_or_else(PoisonError::into_inner);
        if revoked.contains_key(&claims.jti) {
            return Err(TokenError::Revoked);
        }
        Ok(claims)
    }

    fn revoke(&self, claims: &SessionClaims, now: DateTime<Utc>) {
        let mut revoked = self.revoked.write().unwrap_or_else(PoisonError::into_inner);
        revoked.retain(|_, expires_at| *expires_at > now);
        if claims.expires_at > now {
            revoked.insert(claims.jti.clone(), claims.expires_at);
        }
    }
}
