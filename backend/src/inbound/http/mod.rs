//! HTTP inbound adapter exposing the REST API.

pub mod auth;
pub mod error;
pub mod exams;
pub mod health;
pub mod index;
pub mod json;
pub mod schemas;
pub mod state;

use actix_web::web;

pub use error::ApiResult;
pub use json::json_config;

/// Register the banner and every `/api` route.
///
/// Callers provide `web::Data<HttpState>`; health probes are mounted
/// separately because they carry their own state.
///
/// # Examples
/// ```ignore
/// let app = App::new().app_data(web::Data::new(state)).configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(index::index)
        .service(
            web::scope("/api/auth")
                .service(auth::signup)
                .service(auth::login),
        )
        .service(
            web::scope("/api/test")
                .service(exams::create_test)
                .service(exams::list_tests)
                .service(exams::submit_test)
                .service(exams::get_results)
                .service(exams::get_test),
        );
}
