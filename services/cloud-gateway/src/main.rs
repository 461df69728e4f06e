use std::net::SocketAddr;

use cloud_gateway::{router, AppConfig, AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    common::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "failed to load configuration");
            std::process::exit(1);
        }
    };

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(err) => {
            tracing::error!(error = %err, "failed to build HTTP client");
            std::process::exit(1);
        }
    };

    if config.maps_secret_name.is_none() {
        tracing::warn!("MAPS_SECRET_NAME not set; /api/geocode will fail");
    }
    if config.project_id.is_none() {
        tracing::warn!("GCP_PROJECT not set; /api/messages will fail");
    }
    if config.vertex_model.is_none() {
        tracing::warn!("VERTEX_MODEL not set and no project; /api/vertex/generate will fail");
    }

    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(
        project = ?config.project_id,
        region = %config.region,
        model = ?config.vertex_model,
        "cloud-gateway listening on {}",
        addr
    );

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(error = %err, "failed to bind {}", addr);
            std::process::exit(1);
        }
    };

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!(error = %err, "server error");
        std::process::exit(1);
    }
}
