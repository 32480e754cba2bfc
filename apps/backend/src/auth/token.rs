use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use super::claims::{Claims, IdentityClaim};
use crate::state::security_config::SecurityConfig;

/// Failures of token issuance and verification.
///
/// Callers at the HTTP boundary must not reveal which verification failure
/// occurred; see `AppError::from`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// No signing secret is configured.
    #[error("signing secret unavailable")]
    SigningUnavailable,
    /// The token was not produced by this service: bad signature, wrong
    /// algorithm, or not a well-formed token at all.
    #[error("invalid token signature")]
    InvalidSignature,
    /// The token's validity window has passed.
    #[error("token expired")]
    Expired,
    #[error("failed to encode token: {detail}")]
    Encoding { detail: String },
}

/// Issues and verifies HS256 identity tokens with a fixed TTL.
///
/// Stateless apart from the immutable keys; cheap to clone and safe to
/// share across workers.
#[derive(Clone)]
pub struct TokenService {
    security: SecurityConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(security: SecurityConfig) -> Self {
        // Expiry is checked by `verify_at` against an explicit clock with no
        // leeway, so the library check is disabled. `exp` must still be present.
        let mut validation = Validation::new(security.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(&security.jwt_secret),
            decoding_key: DecodingKey::from_secret(&security.jwt_secret),
            validation,
            security,
        }
    }

    pub fn security(&self) -> &SecurityConfig {
        &self.security
    }

    /// Sign `claim` with `iat = now` and `exp = now + TTL`.
    pub fn issue(&self, claim: &IdentityClaim) -> Result<String, TokenError> {
        self.issue_at(claim, SystemTime::now())
    }

    /// Sign `claim` as if the current time were `now`.
    pub fn issue_at(&self, claim: &IdentityClaim, now: SystemTime) -> Result<String, TokenError> {
        if self.security.jwt_secret.is_empty() {
            return Err(TokenError::SigningUnavailable);
        }

        let iat = unix_seconds(now).ok_or_else(|| TokenError::Encoding {
            detail: "issue time precedes the Unix epoch".to_string(),
        })?;
        let ttl = i64::try_from(self.security.token_ttl.as_secs()).map_err(|_| {
            TokenError::Encoding {
                detail: "token TTL out of range".to_string(),
            }
        })?;

        let claims = Claims {
            user: claim.user.clone(),
            iat,
            exp: iat.saturating_add(ttl),
        };

        encode(
            &Header::new(self.security.algorithm),
            &claims,
            &self.encoding_key,
        )
        .map_err(|e| TokenError::Encoding {
            detail: e.to_string(),
        })
    }

    /// Verify signature and expiry against the current time.
    pub fn verify(&self, token: &str) -> Result<IdentityClaim, TokenError> {
        self.verify_at(token, SystemTime::now())
    }

    /// Verify signature and expiry as if the current time were `now`.
    ///
    /// The token is valid for every `now` strictly before `exp`; times are
    /// compared at whole-second granularity.
    pub fn verify_at(&self, token: &str, now: SystemTime) -> Result<IdentityClaim, TokenError> {
        let claims = self.decode_claims(token)?;

        let now = unix_seconds(now).ok_or(TokenError::Expired)?;
        if now >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims.into())
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        // An empty key would accept tokens forged with an empty key.
        if self.security.jwt_secret.is_empty() {
            return Err(TokenError::InvalidSignature);
        }

        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::InvalidSignature)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("security", &self.security)
            .finish_non_exhaustive()
    }
}

fn unix_seconds(t: SystemTime) -> Option<i64> {
    let secs = t.duration_since(UNIX_EPOCH).ok()?.as_secs();
    i64::try_from(secs).ok()
}
