use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use super::validation::{is_blank, is_email, MIN_PASSWORD_LEN};
use crate::error::{AppError, FieldError};
use crate::extractors::{Validate, ValidatedJson};
use crate::services::users as user_service;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if is_blank(&self.name) {
            errors.push(FieldError::new("name", "Name is required"));
        }
        if !is_email(&self.email) {
            errors.push(FieldError::new("email", "Please include a valid email"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(FieldError::new(
                "password",
                "Please enter a password with 6 or more characters",
            ));
        }
        errors
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().body("User Route")
}

/// Register a user and return a token for them
async fn register(
    body: ValidatedJson<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let token =
        user_service::register(&app_state, &body.name, &body.email, &body.password).await?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(index))
            .route(web::post().to(register)),
    );
}
