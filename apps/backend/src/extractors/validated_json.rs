use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::web::BytesMut;
use actix_web::{FromRequest, HttpRequest};
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::Error as JsonError;
use tracing::debug;

use crate::error::{AppError, FieldError};
use crate::logging::pii::Redacted;

/// Same ceiling as the usual JSON body parser default (100kb).
const MAX_BODY_BYTES: usize = 100 * 1024;

/// Field-level validation run after deserialization.
///
/// Returns every failing field, in declaration order; empty means valid.
pub trait Validate {
    fn validate(&self) -> Vec<FieldError>;
}

/// JSON body extractor that deserializes and then validates.
///
/// Parse failures and validation failures both become a 400
/// `{"errors": [...]}` response.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(_req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();

        Box::pin(async move {
            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    debug!(error = %e, "Failed to read request body chunk");
                    bad_body("Failed to read request body")
                })?;
                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    return Err(bad_body("Request body too large"));
                }
                body.extend_from_slice(&chunk);
            }

            let parsed = serde_json::from_slice::<T>(&body).map_err(|e| {
                debug!(
                    error = %Redacted(&e.to_string()),
                    body_size = body.len(),
                    "JSON parsing failed"
                );
                bad_body(&classify_json_error(&e))
            })?;

            let errors = parsed.validate();
            if !errors.is_empty() {
                return Err(AppError::validation(errors));
            }

            Ok(ValidatedJson(parsed))
        })
    }
}

fn bad_body(msg: &str) -> AppError {
    AppError::validation(vec![FieldError::general(msg)])
}

/// Sanitized description of a JSON parse failure
fn classify_json_error(error: &JsonError) -> String {
    match error.classify() {
        serde_json::error::Category::Syntax => {
            let line = error.line();
            format!("Invalid JSON at line {line}")
        }
        serde_json::error::Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        serde_json::error::Category::Data => {
            "Invalid JSON: wrong types for one or more fields".to_string()
        }
        serde_json::error::Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}
