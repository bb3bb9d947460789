//! Backend entry-point: wires REST endpoints and OpenAPI docs.

use actix_web::{HttpServer, web};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::api::health::HealthState;
use backend::build_app;
use backend::config::ServerSettings;
use backend::ids::RequestIdGenerator;
use backend::store::DataStore;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(std::io::Error::other)?;
    let data_file = settings.data_file();
    let store = web::Data::new(DataStore::open(&data_file).map_err(std::io::Error::other)?);
    let ids = web::Data::new(RequestIdGenerator::new());

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays accessible.
    let server_health_state = health_state.clone();
    let server_store = store.clone();
    let server_ids = ids.clone();
    let server = HttpServer::new(move || {
        build_app(
            server_store.clone(),
            server_ids.clone(),
            server_health_state.clone(),
        )
    })
    .bind((settings.bind_address(), settings.port))?;

    info!(
        data_file = %data_file.display(),
        port = settings.port,
        "server starting"
    );
    health_state.mark_ready();
    server.run().await
}
