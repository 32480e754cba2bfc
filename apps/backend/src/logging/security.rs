//! Security event logging.
//!
//! Rejection reasons are recorded here and nowhere else: clients only ever
//! see the uniform 401 body.

use tracing::warn;

use crate::logging::pii::Redacted;

/// Why the auth gate refused a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    MissingToken,
    TokenExpired,
    InvalidToken,
}

impl RejectReason {
    pub fn as_str(self) -> &'static str {
        match self {
            RejectReason::MissingToken => "missing_token",
            RejectReason::TokenExpired => "token_expired",
            RejectReason::InvalidToken => "invalid_token",
        }
    }
}

/// Log a request rejected by the auth gate.
pub fn auth_rejected(reason: RejectReason, path: &str) {
    warn!(
        event = "SECURITY_AUTH_REJECTED",
        reason = reason.as_str(),
        path,
        "Authorization denied"
    );
}

/// Log a failed login attempt.
pub fn login_failed(reason: &str, email: &str) {
    warn!(
        event = "SECURITY_LOGIN_FAILED",
        email = %Redacted(email),
        reason,
        "Authentication failure"
    );
}
