pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod secrets;
pub mod state;

#[cfg(test)]
mod test_support;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use config::AppConfig;
pub use state::AppState;

/// ルーティング定義
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/api/geocode", get(handlers::geocode))
        .route("/api/vertex/generate", post(handlers::generate))
        .route("/api/messages", post(handlers::create_message))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
