//! Registration, login and identity lookup on top of the credential store.

use actix_web::web;
use once_cell::sync::Lazy;
use tracing::info;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::IdentityClaim;
use crate::error::AppError;
use crate::logging::pii::Redacted;
use crate::logging::security;
use crate::repos::users::{normalize_email, NewUser, User};
use crate::state::app_state::AppState;

/// Create a user and return a token identifying them.
pub async fn register(
    state: &AppState,
    name: &str,
    email: &str,
    password: &str,
) -> Result<String, AppError> {
    let email = normalize_email(email);

    if state.users.find_by_email(&email).await?.is_some() {
        return Err(AppError::UserExists);
    }

    // Hashing runs on the blocking pool, off the async workers.
    let password = password.to_string();
    let password_hash = web::block(move || hash_password(&password)).await??;

    let user = state
        .users
        .create(NewUser {
            name: name.trim().to_string(),
            email,
            password_hash,
        })
        .await?;

    info!(user_id = %user.id, email = %Redacted(&user.email), "User registered");

    Ok(state.tokens.issue(&IdentityClaim::for_user(user.id))?)
}

/// Verified against when the email is unknown, so both failure paths pay
/// the same hashing cost.
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password("not-a-real-account-password").ok());

/// Check credentials and return a token for the matching user.
///
/// Unknown email and wrong password fail identically, in body and in work done.
pub async fn login(state: &AppState, email: &str, password: &str) -> Result<String, AppError> {
    let email = normalize_email(email);

    let user = state.users.find_by_email(&email).await?;
    let stored_hash = match &user {
        Some(user) => Some(user.password_hash.clone()),
        None => DUMMY_HASH.clone(),
    };

    let password = password.to_string();
    let matches = web::block(move || {
        stored_hash.is_some_and(|hash| verify_password(&password, &hash))
    })
    .await?;

    let user = match user {
        Some(user) if matches => user,
        Some(_) => {
            security::login_failed("wrong_password", &email);
            return Err(AppError::InvalidCredentials);
        }
        None => {
            security::login_failed("unknown_email", &email);
            return Err(AppError::InvalidCredentials);
        }
    };

    Ok(state.tokens.issue(&IdentityClaim::for_user(user.id))?)
}

/// Load the user named by an authenticated identity.
pub async fn current_user(state: &AppState, user_id: &str) -> Result<User, AppError> {
    state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dummy_hash_is_a_real_argon2_hash() {
        let hash = DUMMY_HASH.as_deref().expect("dummy hash should build");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("not-a-real-account-password", hash));
    }

    #[actix_web::test]
    async fn test_unknown_email_fails_even_with_dummy_password() {
        let state = AppState::for_tests();

        let err = login(&state, "ghost@example.com", "not-a-real-account-password")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[actix_web::test]
    async fn test_wrong_password_and_unknown_email_match() {
        let state = AppState::for_tests();
        register(&state, "Jane", "jane@example.com", "hunter22")
            .await
            .unwrap();

        let wrong = login(&state, "jane@example.com", "hunter23").await.unwrap_err();
        let unknown = login(&state, "john@example.com", "hunter22").await.unwrap_err();

        assert_eq!(wrong.to_string(), unknown.to_string());
        assert_eq!(wrong.status(), unknown.status());
    }

    #[actix_web::test]
    async fn test_current_user_not_found() {
        let state = AppState::for_tests();
        assert!(matches!(
            current_user(&state, "missing").await,
            Err(AppError::NotFound { .. })
        ));
    }
}
