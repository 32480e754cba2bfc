use actix_web::{web, App, HttpServer};
use devconnector::config::AppConfig;
use devconnector::middleware::{RequestLog, RequestTrace};
use devconnector::routes;
use devconnector::state::AppState;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // A missing signing secret must stop the process before it serves anything.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let data = web::Data::new(AppState::in_memory(config.security.clone()));

    info!(host = %config.host, port = config.port, "Server starting");

    HttpServer::new(move || {
        App::new()
            .wrap(RequestLog)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
