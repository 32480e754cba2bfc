//! Token gate for protected scopes.
//!
//! Reads the identity token from the `x-auth-token` header, verifies it, and
//! stores the resulting [`AuthUser`] in request extensions before calling the
//! wrapped service. Any failure short-circuits with a 401 `{"msg": ...}` body
//! and the wrapped service never runs:
//!
//! - header absent or empty: "No token, authorization denied"
//! - anything else that fails verification: "Token is not valid"
//!
//! Expired and forged tokens are indistinguishable to the client; the precise
//! reason only goes to the security log.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::TokenError;
use crate::error::AppError;
use crate::extractors::current_user::AuthUser;
use crate::logging::security::{self, RejectReason};
use crate::state::app_state::AppState;

/// Header carrying the identity token.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

pub struct AuthGate;

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware { service }))
    }
}

pub struct AuthGateMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(&req) {
            Ok(user) => {
                // Identity must be in place before the downstream service sees the request
                req.extensions_mut().insert(user);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(err) => {
                let res = req.error_response(err).map_into_right_body();
                Box::pin(async move { Ok(res) })
            }
        }
    }
}

fn authenticate(req: &ServiceRequest) -> Result<AuthUser, AppError> {
    let Some(raw) = req
        .headers()
        .get(AUTH_TOKEN_HEADER)
        .filter(|value| !value.is_empty())
    else {
        security::auth_rejected(RejectReason::MissingToken, req.path());
        return Err(AppError::MissingToken);
    };

    // A header that is not visible ASCII cannot be one of our tokens.
    let Ok(token) = raw.to_str() else {
        security::auth_rejected(RejectReason::InvalidToken, req.path());
        return Err(AppError::InvalidToken);
    };

    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available"))?;

    match state.tokens.verify(token) {
        Ok(claim) => Ok(AuthUser {
            id: claim.user.id,
        }),
        Err(e) => {
            let reason = match e {
                TokenError::Expired => RejectReason::TokenExpired,
                _ => RejectReason::InvalidToken,
            };
            security::auth_rejected(reason, req.path());
            Err(e.into())
        }
    }
}
