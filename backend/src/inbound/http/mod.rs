//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod todos;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register extractor error handlers, health probes, and todo routes.
///
/// The caller provides `web::Data<HttpState>` and `web::Data<HealthState>`.
/// `POST /todos/reorder` is registered ahead of the `{id}` routes.
///
/// [`HttpState`]: state::HttpState
/// [`HealthState`]: health::HealthState
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(health::status)
        .service(health::ready)
        .service(health::live)
        .service(todos::list_todos)
        .service(todos::create_todo)
        .service(todos::reorder_todos)
        .service(todos::toggle_todo)
        .service(todos::update_todo)
        .service(todos::delete_todo);
}
