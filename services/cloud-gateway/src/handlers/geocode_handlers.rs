use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::ErrorResponse;
use serde_json::Value;
use validator::Validate;

use super::error_response;
use crate::domain::GeocodeQuery;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/geocode - 住所のジオコーディング
pub async fn geocode(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let query = query
        .map(|Query(pairs)| GeocodeQuery::from_pairs(pairs))
        .unwrap_or_default();

    match lookup_address(&state, query).await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(AppError::BadRequest(msg)) => {
            error_response(StatusCode::BAD_REQUEST, ErrorResponse::new(msg))
        }
        Err(err) => {
            tracing::error!(error = %err, "geocode failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("geocode failed"),
            )
        }
    }
}

async fn lookup_address(state: &AppState, query: GeocodeQuery) -> AppResult<Value> {
    // バリデーション
    if query.validate().is_err() {
        return Err(AppError::BadRequest("address required".to_string()));
    }
    let address = query.address.unwrap_or_default();

    let api_key = state.secrets.geocode_api_key().await?;
    let body = state.geocoder.geocode(&address, &api_key).await?;

    Ok(body)
}
