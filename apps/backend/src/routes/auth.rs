use actix_web::{guard, web, HttpResponse};
use serde::Deserialize;

use super::users::TokenResponse;
use super::validation::is_email;
use crate::error::{AppError, FieldError};
use crate::extractors::{AuthUser, Validate, ValidatedJson};
use crate::middleware::auth_gate::AuthGate;
use crate::services::users as user_service;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if !is_email(&self.email) {
            errors.push(FieldError::new("email", "Please include a valid email"));
        }
        // Presence only; the length rule belongs to registration.
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        }
        errors
    }
}

/// Return the authenticated user's record
async fn me(user: AuthUser, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let record = user_service::current_user(&app_state, &user.id).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Exchange email and password for a token
async fn login(
    body: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let token = user_service::login(&app_state, &body.email, &body.password).await?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // GET is private, POST is public: separate resources so the gate only wraps GET.
    cfg.service(
        web::resource("")
            .guard(guard::Get())
            .wrap(AuthGate)
            .route(web::get().to(me)),
    )
    .service(web::resource("").route(web::post().to(login)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_password_presence_only() {
        assert!(request("jane@example.com", "      ").validate().is_empty());
        assert_eq!(
            request("jane@example.com", "").validate(),
            vec![FieldError::new("password", "Password is required")]
        );
    }
}
