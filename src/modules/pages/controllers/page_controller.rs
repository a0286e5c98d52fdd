use actix_web::{http::header::ContentType, web, HttpResponse};

/// Landing page bundled at compile time
const INDEX_HTML: &str = include_str!("../../../../templates/index.html");

/// GET / - Static landing page with the plan form
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INDEX_HTML)
}

/// Configure page routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index));
}
