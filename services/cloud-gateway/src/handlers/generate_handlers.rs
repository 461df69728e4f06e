use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::ErrorResponse;
use serde_json::{json, Value};
use validator::Validate;

use super::error_response;
use crate::domain::GenerateRequest;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/vertex/generate - テキスト生成
///
/// 失敗時は上流エラーの内容を `details` に含めて返す。
pub async fn generate(
    State(state): State<AppState>,
    request: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    let request = request.map(|Json(r)| r).unwrap_or_default();

    match predict(&state, request).await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(AppError::BadRequest(msg)) => {
            error_response(StatusCode::BAD_REQUEST, ErrorResponse::new(msg))
        }
        Err(err) => {
            tracing::error!(error = %err, model = ?state.vertex_model, "Vertex error");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::with_details("vertex failed", err.to_string()),
            )
        }
    }
}

async fn predict(state: &AppState, request: GenerateRequest) -> AppResult<Value> {
    if request.validate().is_err() {
        return Err(AppError::BadRequest("prompt required".to_string()));
    }
    let prompt = request.prompt.unwrap_or_default();
    let model = state.model()?;

    let instances = vec![json!({ "content": prompt })];
    let response = state.predictor.predict(model, instances, json!({})).await?;

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_state, StubPredictor, MODEL};
    use axum::{body::Body, http::Request, routing::post, Router};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_app(state: AppState) -> Router {
        Router::new()
            .route("/api/vertex/generate", post(generate))
            .with_state(state)
    }

    async fn send(app: Router, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/vertex/generate")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_generate_success() {
        let payload = json!({
            "predictions": [{ "content": "Bonjour" }],
            "deployedModelId": "123"
        });
        let predictor = Arc::new(StubPredictor::returning(payload.clone()));
        let mut state = test_state();
        state.predictor = predictor.clone();

        let (status, body) = send(create_test_app(state), r#"{"prompt":"Say hello"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, payload);

        let calls = predictor.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, MODEL);
        assert_eq!(calls[0].1, vec![json!({ "content": "Say hello" })]);
    }

    #[tokio::test]
    async fn test_generate_missing_prompt() {
        let predictor = Arc::new(StubPredictor::returning(json!({})));
        let mut state = test_state();
        state.predictor = predictor.clone();
        let app = create_test_app(state);

        for body in ["{}", r#"{"prompt":""}"#, r#"{"prompt":null}"#, "not json", ""] {
            let (status, response) = send(app.clone(), body).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
            assert_eq!(response, json!({ "error": "prompt required" }));
        }
        assert!(predictor.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generate_failure_includes_details() {
        let mut state = test_state();
        state.predictor = Arc::new(StubPredictor::failing("quota exceeded"));

        let (status, body) = send(create_test_app(state), r#"{"prompt":"hi"}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "error": "vertex failed", "details": "Error: quota exceeded" })
        );
    }

    #[tokio::test]
    async fn test_generate_without_model() {
        let predictor = Arc::new(StubPredictor::returning(json!({})));
        let mut state = test_state();
        state.predictor = predictor.clone();
        state.vertex_model = None;
        let app = create_test_app(state);

        let (status, body) = send(app.clone(), r#"{"prompt":"hi"}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "error": "vertex failed", "details": "Error: GCP_PROJECT not set" })
        );
        assert!(predictor.calls.lock().unwrap().is_empty());

        // 入力検証が先
        let (status, body) = send(app, "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "prompt required" }));
    }
}
