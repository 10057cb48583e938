//! Bearer-token service.
//!
//! Issues signed, time-limited tokens binding a user identifier, and
//! decodes presented tokens back to that identifier. Tokens are
//! stateless: validity is signature plus expiry, never a revocation
//! list. Revocation happens one layer up, where the subject is resolved
//! against the store - a deleted user's tokens stop working there.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use orchard_core::UserUuid;

/// Tokens expire this long after issuance.
const TOKEN_LIFETIME_HOURS: i64 = 24;

/// The claim set carried by a token.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user uuid.
    pub sub: String,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// The claim set could not be signed.
#[derive(Debug, Error)]
#[error("token generation failed: {0}")]
pub struct TokenIssueError(#[from] jsonwebtoken::errors::Error);

/// Issues and decodes HS256-signed bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    /// Create a token service from the configured signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
        }
    }

    /// Issue a token for `user_uuid`, expiring in 24 hours.
    ///
    /// # Errors
    ///
    /// Returns `TokenIssueError` if signing fails.
    pub fn issue(&self, user_uuid: UserUuid) -> Result<String, TokenIssueError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: user_uuid.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp(),
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Decode a presented token back to its subject.
    ///
    /// Any failure - bad signature, malformed structure, expired claim,
    /// unparsable subject - yields `None`. Callers never learn which
    /// check failed.
    #[must_use]
    pub fn decode(&self, token: &str) -> Option<UserUuid> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .ok()?
            .claims
            .sub
            .parse()
            .ok()
    }
}
