use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use super::{DocumentStore, SecretStore, UpstreamError, UpstreamResult};
use crate::domain::Record;

/// インメモリシークレットストア（テスト用）
pub struct InMemorySecretStore {
    secrets: RwLock<HashMap<String, String>>,
}

impl InMemorySecretStore {
    pub fn new() -> Self {
        Self {
            secrets: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_secret(self, reference: impl Into<String>, value: impl Into<String>) -> Self {
        if let Ok(mut secrets) = self.secrets.write() {
            secrets.insert(reference.into(), value.into());
        }
        self
    }
}

impl Default for InMemorySecretStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecretStore for InMemorySecretStore {
    async fn access(&self, reference: &str) -> UpstreamResult<String> {
        let secrets = self
            .secrets
            .read()
            .map_err(|e| UpstreamError::Other(e.to_string()))?;

        secrets
            .get(reference)
            .cloned()
            .ok_or_else(|| UpstreamError::NotFound(reference.to_string()))
    }
}

/// インメモリドキュメントストア（テスト用）
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<(String, Record)>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// コレクション内のドキュメントを挿入順に取得
    pub fn documents(&self, collection: &str) -> Vec<(String, Record)> {
        self.collections
            .read()
            .map(|collections| collections.get(collection).cloned().unwrap_or_default())
            .unwrap_or_default()
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn add(&self, collection: &str, record: Record) -> UpstreamResult<String> {
        let mut collections = self
            .collections
            .write()
            .map_err(|e| UpstreamError::Other(e.to_string()))?;

        let id = Uuid::new_v4().simple().to_string();
        collections
            .entry(collection.to_string())
            .or_default()
            .push((id.clone(), record));

        Ok(id)
    }
}
