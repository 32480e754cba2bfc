use actix_web::web;

pub mod auth;
pub mod health;
pub mod users;
pub mod validation;

/// Register every route.
///
/// Protected endpoints carry their own `AuthGate`, so this is the complete
/// wiring for both `main.rs` and tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Index: /
    cfg.configure(health::configure_routes);

    // User routes: /api/users
    cfg.service(web::scope("/api/users").configure(users::configure_routes));

    // Auth routes: /api/auth
    cfg.service(web::scope("/api/auth").configure(auth::configure_routes));
}
