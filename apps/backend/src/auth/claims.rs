//! Identity claims carried inside backend-issued tokens.

use serde::{Deserialize, Serialize};

/// Reference to the authenticated user as it appears in the token payload.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub id: String,
}

/// The identity payload embedded in a token: `{ "user": { "id": ... } }`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct IdentityClaim {
    pub user: UserRef,
}

impl IdentityClaim {
    pub fn for_user(id: impl Into<String>) -> Self {
        Self {
            user: UserRef { id: id.into() },
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }
}

/// Full signed payload: the identity claim plus its validity window.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub user: UserRef,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

impl From<Claims> for IdentityClaim {
    fn from(claims: Claims) -> Self {
        Self { user: claims.user }
    }
}
