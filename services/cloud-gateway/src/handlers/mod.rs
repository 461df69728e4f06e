pub mod generate_handlers;
pub mod geocode_handlers;
pub mod message_handlers;
pub mod system_handlers;

pub use generate_handlers::*;
pub use geocode_handlers::*;
pub use message_handlers::*;
pub use system_handlers::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::ErrorResponse;

fn error_response(status: StatusCode, body: ErrorResponse) -> Response {
    (status, Json(body)).into_response()
}
