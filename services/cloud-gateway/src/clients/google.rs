//! Google Cloud の REST API クライアント
//!
//! Secret Manager, Maps Geocoding, Vertex AI, Firestore を `reqwest` で呼び出す。
//! いずれもリトライは行わず、タイムアウトは共有の `Client` に設定された値に従う。

use async_trait::async_trait;
use base64::Engine;
use chrono::SecondsFormat;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;

use super::{
    AccessTokenProvider, DocumentStore, Geocoder, PredictionService, SecretStore, UpstreamError,
    UpstreamResult,
};
use crate::domain::{FieldValue, Record};

pub type DynTokenProvider = Arc<dyn AccessTokenProvider>;

/// ステータスを確認して JSON 本文を返す
async fn send_json(request: RequestBuilder) -> UpstreamResult<Value> {
    let response = request.send().await?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(UpstreamError::Status { status, body });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Decode(e.to_string()))
}

/// Secret Manager クライアント
pub struct GoogleSecretStore {
    client: Client,
    endpoint: String,
    tokens: DynTokenProvider,
}

impl GoogleSecretStore {
    pub fn new(client: Client, endpoint: impl Into<String>, tokens: DynTokenProvider) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            tokens,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AccessSecretVersionResponse {
    payload: SecretPayload,
}

#[derive(Debug, Deserialize)]
struct SecretPayload {
    data: String,
}

#[async_trait]
impl SecretStore for GoogleSecretStore {
    async fn access(&self, reference: &str) -> UpstreamResult<String> {
        let url = format!(
            "{}/v1/{}:access",
            self.endpoint.trim_end_matches('/'),
            reference
        );

        let result = async {
            let token = self.tokens.access_token().await?;
            let body = send_json(self.client.get(&url).bearer_auth(token)).await?;
            let parsed: AccessSecretVersionResponse =
                serde_json::from_value(body).map_err(|e| UpstreamError::Decode(e.to_string()))?;
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(parsed.payload.data.as_bytes())
                .map_err(|e| UpstreamError::Decode(e.to_string()))?;
            String::from_utf8(bytes).map_err(|e| UpstreamError::Decode(e.to_string()))
        }
        .await;

        if let Err(err) = &result {
            tracing::error!(secret = %reference, error = %err, "Error accessing secret");
        }

        result
    }
}

/// Maps Geocoding クライアント
///
/// 応答ステータスは確認せず、本文が JSON であればそのまま返す。
/// API キーはクエリに載るため、エラーからは URL を取り除く。
pub struct MapsGeocoder {
    client: Client,
    endpoint: String,
}

impl MapsGeocoder {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Geocoder for MapsGeocoder {
    async fn geocode(&self, address: &str, api_key: &str) -> UpstreamResult<Value> {
        tracing::debug!(address_len = address.len(), "Sending geocode request");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("address", address), ("key", api_key)])
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.without_url()))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Transport(e.without_url()))?;
        serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

/// Vertex AI 推論クライアント
pub struct VertexPredictionService {
    client: Client,
    endpoint: String,
    tokens: DynTokenProvider,
}

impl VertexPredictionService {
    pub fn new(client: Client, endpoint: impl Into<String>, tokens: DynTokenProvider) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            tokens,
        }
    }
}

#[async_trait]
impl PredictionService for VertexPredictionService {
    async fn predict(
        &self,
        endpoint: &str,
        instances: Vec<Value>,
        parameters: Value,
    ) -> UpstreamResult<Value> {
        let token = self.tokens.access_token().await?;
        let url = format!(
            "{}/v1/{}:predict",
            self.endpoint.trim_end_matches('/'),
            endpoint
        );

        tracing::debug!(
            model = %endpoint,
            instance_count = instances.len(),
            "Sending request to Vertex AI"
        );

        let body = json!({
            "instances": instances,
            "parameters": parameters,
        });

        send_json(self.client.post(&url).bearer_auth(token).json(&body)).await
    }
}

/// Firestore クライアント（`(default)` データベース）
pub struct FirestoreDocumentStore {
    client: Client,
    endpoint: String,
    project_id: String,
    tokens: DynTokenProvider,
}

impl FirestoreDocumentStore {
    pub fn new(
        client: Client,
        endpoint: impl Into<String>,
        project_id: impl Into<String>,
        tokens: DynTokenProvider,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            project_id: project_id.into(),
            tokens,
        }
    }
}

/// レコードを Firestore の型付きフィールド表現に変換
pub fn encode_fields(record: &Record) -> Value {
    let fields: Map<String, Value> = record
        .iter()
        .map(|(key, value)| {
            let encoded = match value {
                FieldValue::String(s) => json!({ "stringValue": s }),
                FieldValue::Timestamp(ts) => {
                    json!({ "timestampValue": ts.to_rfc3339_opts(SecondsFormat::Micros, true) })
                }
            };
            (key.clone(), encoded)
        })
        .collect();

    json!({ "fields": fields })
}

#[derive(Debug, Deserialize)]
struct CreatedDocument {
    name: String,
}

#[async_trait]
impl DocumentStore for FirestoreDocumentStore {
    async fn add(&self, collection: &str, record: Record) -> UpstreamResult<String> {
        let token = self.tokens.access_token().await?;
        let url = format!(
            "{}/v1/projects/{}/databases/(default)/documents/{}",
            self.endpoint.trim_end_matches('/'),
            self.project_id,
            collection
        );

        let body = send_json(
            self.client
                .post(&url)
                .bearer_auth(token)
                .json(&encode_fields(&record)),
        )
        .await?;

        let created: CreatedDocument =
            serde_json::from_value(body).map_err(|e| UpstreamError::Decode(e.to_string()))?;

        created
            .name
            .rsplit('/')
            .next()
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .ok_or_else(|| UpstreamError::Decode(format!("unexpected document name: {}", created.name)))
    }
}
