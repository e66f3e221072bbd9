//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerSettings;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use thiserror::Error;

use todo_backend::Trace;
#[cfg(debug_assertions)]
use todo_backend::doc::ApiDoc;
use todo_backend::inbound::http::configure;
use todo_backend::inbound::http::health::HealthState;
use todo_backend::inbound::http::state::HttpState;
use todo_backend::outbound::persistence::{MigrationError, PoolError};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Failures while starting the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to load configuration: {0}")]
    Config(String),
    #[error("invalid bind address: {value}")]
    BindAddr { value: String },
    #[error(transparent)]
    Migration(#[from] MigrationError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error("failed to start HTTP server: {0}")]
    Io(#[from] std::io::Error),
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the HTTP server for the given settings.
///
/// The todo store is connected (and migrated) before binding; `health_state`
/// is marked ready once the listener is up.
///
/// # Errors
/// Returns [`ServerError`] when the address is invalid, the store cannot be
/// prepared, or binding fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    settings: &ServerSettings,
) -> Result<Server, ServerError> {
    let bind_addr = settings.bind_addr()?;
    let http_state = web::Data::new(build_http_state(settings).await?);

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    tracing::info!(%bind_addr, "todo backend listening");
    Ok(server)
}
