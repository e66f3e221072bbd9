//! Backend entry-point: loads settings, wires the todo API, and serves it.

mod server;

use std::process::ExitCode;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerError, ServerSettings, create_server};
use todo_backend::inbound::http::health::HealthState;

async fn run() -> Result<(), ServerError> {
    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| ServerError::Config(err.to_string()))?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, &settings).await?;
    server.await?;
    Ok(())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "todo backend stopped");
            ExitCode::FAILURE
        }
    }
}
