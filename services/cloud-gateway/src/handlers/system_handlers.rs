use axum::Json;

/// GET / - サービス情報
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "cloud-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /health - 死活監視
pub async fn health() -> &'static str {
    "ok"
}
