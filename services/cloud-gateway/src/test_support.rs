//! ハンドラテスト用のスタブと状態

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::clients::{
    DocumentStore, Geocoder, InMemoryDocumentStore, InMemorySecretStore, PredictionService,
    UpstreamError, UpstreamResult,
};
use crate::domain::Record;
use crate::secrets::SecretResolver;
use crate::state::AppState;

pub const MAPS_REF: &str = "projects/demo/secrets/maps-key/versions/latest";
pub const MODEL: &str = "projects/demo/locations/europe-west1/publishers/google/models/text-bison@001";

/// 固定の応答（またはエラー）を返すスタブ。呼び出し内容を記録する。
pub struct StubGeocoder {
    pub response: Option<Value>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl StubGeocoder {
    pub fn returning(response: Value) -> Self {
        Self {
            response: Some(response),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn geocode(&self, address: &str, api_key: &str) -> UpstreamResult<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((address.to_string(), api_key.to_string()));
        self.response
            .clone()
            .ok_or_else(|| UpstreamError::Decode("not json".to_string()))
    }
}

pub struct StubPredictor {
    pub result: Result<Value, String>,
    pub calls: Mutex<Vec<(String, Vec<Value>)>>,
}

impl StubPredictor {
    pub fn returning(response: Value) -> Self {
        Self {
            result: Ok(response),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PredictionService for StubPredictor {
    async fn predict(
        &self,
        endpoint: &str,
        instances: Vec<Value>,
        _parameters: Value,
    ) -> UpstreamResult<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((endpoint.to_string(), instances));
        self.result.clone().map_err(UpstreamError::Other)
    }
}

/// 固定 ID を採番するドキュメントストア
pub struct FixedIdDocumentStore {
    pub id: String,
    pub records: Mutex<Vec<(String, Record)>>,
}

impl FixedIdDocumentStore {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            records: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl DocumentStore for FixedIdDocumentStore {
    async fn add(&self, collection: &str, record: Record) -> UpstreamResult<String> {
        self.records
            .lock()
            .unwrap()
            .push((collection.to_string(), record));
        Ok(self.id.clone())
    }
}

/// 常に失敗するドキュメントストア
pub struct FailingDocumentStore {
    pub attempts: AtomicUsize,
}

impl FailingDocumentStore {
    pub fn new() -> Self {
        Self {
            attempts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DocumentStore for FailingDocumentStore {
    async fn add(&self, _collection: &str, _record: Record) -> UpstreamResult<String> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(UpstreamError::Status {
            status: 403,
            body: "permission denied".to_string(),
        })
    }
}

/// 既定のスタブで構成した状態
pub fn test_state() -> AppState {
    let secrets = InMemorySecretStore::new().with_secret(MAPS_REF, "maps-key");

    AppState {
        secrets: SecretResolver::new(Arc::new(secrets), Some(MAPS_REF.to_string())),
        geocoder: Arc::new(StubGeocoder::returning(serde_json::json!({ "results": [] }))),
        predictor: Arc::new(StubPredictor::returning(serde_json::json!({ "predictions": [] }))),
        documents: Some(Arc::new(InMemoryDocumentStore::new())),
        vertex_model: Some(MODEL.to_string()),
    }
}
