//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;

use actix_web::{HttpRequest, ResponseError, web};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(posts::index))
        .route("/group/{slug}/", web::get().to(posts::group_list))
        .route("/profile/{username}/", web::get().to(posts::profile))
        .route("/posts/{post_id}/", web::get().to(posts::post_detail))
        .service(
            web::resource("/posts/{post_id}/edit/")
                .route(web::get().to(posts::edit_form))
                .route(web::post().to(posts::edit_post)),
        )
        .service(
            web::resource("/create/")
                .route(web::get().to(posts::create_form))
                .route(web::post().to(posts::create_post)),
        )
        .service(
            web::scope("/auth")
                .route("/signup/", web::post().to(auth::signup))
                .route("/login/", web::post().to(auth::login)),
        )
        .route("/health/", web::get().to(health::health_check));
}

/// State, extractor settings, routes and the not-found fallback.
///
/// ```ignore
/// HttpServer::new(move || App::new().configure(configure_app(state.clone())))
/// ```
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state))
            .app_data(web::PathConfig::default().error_handler(|err, req| {
                tracing::debug!(path = %req.path(), error = %err, "Unmatched path parameter");
                AppError::NotFound(format!("No page at {}", req.path())).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(err.to_string()).into()
            }))
            .app_data(web::FormConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(err.to_string()).into()
            }))
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(err.to_string()).into()
            }));

        configure_routes(cfg);
        cfg.default_service(web::to(not_found));
    }
}

async fn not_found(req: HttpRequest) -> actix_web::HttpResponse {
    AppError::NotFound(format!("No page at {}", req.path())).error_response()
}
