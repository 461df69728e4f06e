use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::ErrorResponse;
use validator::Validate;

use super::error_response;
use crate::domain::{CreateMessageRequest, CreateMessageResponse, Message, MESSAGES_COLLECTION};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/messages - メッセージ保存
pub async fn create_message(
    State(state): State<AppState>,
    request: Result<Json<CreateMessageRequest>, JsonRejection>,
) -> Response {
    let request = request.map(|Json(r)| r).unwrap_or_default();

    match store_message(&state, request).await {
        Ok(id) => (StatusCode::OK, Json(CreateMessageResponse::created(id))).into_response(),
        Err(AppError::BadRequest(msg)) => {
            error_response(StatusCode::BAD_REQUEST, ErrorResponse::new(msg))
        }
        Err(err) => {
            tracing::error!(error = %err, collection = MESSAGES_COLLECTION, "firestore write failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("firestore write failed"),
            )
        }
    }
}

async fn store_message(state: &AppState, request: CreateMessageRequest) -> AppResult<String> {
    if request.validate().is_err() {
        return Err(AppError::BadRequest("user and text required".to_string()));
    }

    let message = Message::new(
        request.user.unwrap_or_default(),
        request.text.unwrap_or_default(),
    );
    let id = state
        .document_store()?
        .add(MESSAGES_COLLECTION, message.to_record())
        .await?;

    tracing::info!(id = %id, "message stored");

    Ok(id)
}
