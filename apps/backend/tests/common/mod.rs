#![allow(dead_code)]

// tests/common/mod.rs
pub mod proptest_prelude;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use devconnector::middleware::{RequestLog, RequestTrace};
use devconnector::routes;
use devconnector::state::AppState;
use serde_json::{json, Value};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Build the production route tree around `state`, with the same request
/// middleware as `main.rs`.
pub async fn init_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    init_app_with(state, |_| {}).await
}

/// Like [`init_app`], plus extra routes registered by `extra`.
pub async fn init_app_with<F>(
    state: AppState,
    extra: F,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>
where
    F: FnOnce(&mut web::ServiceConfig),
{
    test::init_service(
        App::new()
            .wrap(RequestLog)
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(routes::configure)
            .configure(extra),
    )
    .await
}

pub fn register_body(name: &str, email: &str, password: &str) -> Value {
    json!({ "name": name, "email": email, "password": password })
}

/// Register through the HTTP API and return the issued token.
pub async fn register_user<S>(app: &S, name: &str, email: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(register_body(name, email, password))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 200, "registration should succeed");

    let body: Value = test::read_body_json(resp).await;
    body["token"]
        .as_str()
        .expect("token field should be a string")
        .to_string()
}
