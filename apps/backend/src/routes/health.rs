use actix_web::{web, HttpResponse};

pub async fn root() -> HttpResponse {
    HttpResponse::Ok().body("API Running")
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root));
}
