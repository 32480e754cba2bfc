use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::auth::TokenError;

/// Message returned when a protected route is called without a token.
pub const MSG_NO_TOKEN: &str = "No token, authorization denied";
/// Message returned for every token verification failure.
pub const MSG_INVALID_TOKEN: &str = "Token is not valid";
const MSG_SERVER_ERROR: &str = "Server Error";

/// `{"msg": "..."}`
#[derive(Serialize)]
pub struct MsgBody {
    pub msg: String,
}

/// One entry of an `{"errors": [...]}` body.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    pub msg: String,
}

impl FieldError {
    pub fn new(param: &str, msg: &str) -> Self {
        Self {
            param: Some(param.to_string()),
            msg: msg.to_string(),
        }
    }

    pub fn general(msg: &str) -> Self {
        Self {
            param: None,
            msg: msg.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorsBody {
    errors: Vec<FieldError>,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No token, authorization denied")]
    MissingToken,
    #[error("Token is not valid")]
    InvalidToken,
    #[error("Validation error: {errors:?}")]
    Validation { errors: Vec<FieldError> },
    #[error("User already exists")]
    UserExists,
    #[error("Invalid Credentials")]
    InvalidCredentials,
    #[error("Not found: {detail}")]
    NotFound { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingToken | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Validation { .. } | AppError::UserExists | AppError::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } | AppError::Config { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation { errors }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    fn field_errors(&self) -> Option<Vec<FieldError>> {
        match self {
            AppError::Validation { errors } => Some(errors.clone()),
            AppError::UserExists | AppError::InvalidCredentials => {
                Some(vec![FieldError::general(&self.to_string())])
            }
            _ => None,
        }
    }

    fn msg(&self) -> String {
        match self {
            AppError::Internal { .. } | AppError::Config { .. } => MSG_SERVER_ERROR.to_string(),
            AppError::NotFound { detail } => detail.clone(),
            other => other.to_string(),
        }
    }
}

/// Verification failures all collapse into one client-visible error.
impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::InvalidSignature | TokenError::Expired => AppError::InvalidToken,
            TokenError::SigningUnavailable | TokenError::Encoding { .. } => {
                AppError::internal(format!("token issuance failed: {e}"))
            }
        }
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(e: argon2::password_hash::Error) -> Self {
        AppError::internal(format!("password hashing failed: {e}"))
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        AppError::internal(format!("blocking task failed: {e}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();

        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        match self.field_errors() {
            Some(errors) => HttpResponse::build(status).json(ErrorsBody { errors }),
            None => HttpResponse::build(status).json(MsgBody { msg: self.msg() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use serde_json::{json, Value};

    use super::*;

    async fn body_of(err: AppError) -> (StatusCode, Value) {
        let resp = err.error_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn test_auth_errors_render_msg_body() {
        assert_eq!(
            body_of(AppError::MissingToken).await,
            (StatusCode::UNAUTHORIZED, json!({ "msg": MSG_NO_TOKEN }))
        );
        assert_eq!(
            body_of(AppError::InvalidToken).await,
            (StatusCode::UNAUTHORIZED, json!({ "msg": MSG_INVALID_TOKEN }))
        );
    }

    #[actix_web::test]
    async fn test_token_errors_are_indistinguishable() {
        let expired = body_of(TokenError::Expired.into()).await;
        let bad_sig = body_of(TokenError::InvalidSignature.into()).await;
        assert_eq!(expired, bad_sig);
    }

    #[actix_web::test]
    async fn test_internal_detail_is_not_leaked() {
        let (status, body) = body_of(AppError::internal("db exploded at 10.0.0.3")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "msg": "Server Error" }));
    }

    #[actix_web::test]
    async fn test_field_error_bodies() {
        let (status, body) = body_of(AppError::validation(vec![FieldError::new(
            "email",
            "Please include a valid email",
        )]))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "errors": [{ "param": "email", "msg": "Please include a valid email" }] })
        );

        let (_, body) = body_of(AppError::InvalidCredentials).await;
        assert_eq!(body, json!({ "errors": [{ "msg": "Invalid Credentials" }] }));
    }

    #[test]
    fn test_signing_unavailable_is_server_error() {
        let err: AppError = TokenError::SigningUnavailable.into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
