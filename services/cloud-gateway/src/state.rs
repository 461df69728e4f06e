use reqwest::Client;
use std::sync::Arc;

use crate::clients::{
    AccessTokenProvider, DocumentStore, FirestoreDocumentStore, Geocoder, GoogleSecretStore,
    MapsGeocoder, MetadataTokenProvider, PredictionService, StaticTokenProvider,
    VertexPredictionService,
};
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::secrets::SecretResolver;

pub type DynGeocoder = Arc<dyn Geocoder>;
pub type DynPredictionService = Arc<dyn PredictionService>;
pub type DynDocumentStore = Arc<dyn DocumentStore>;

/// ハンドラ間で共有するクライアント群（起動後は不変）
///
/// プロジェクト未設定時は `documents` と `vertex_model` が `None` になり、
/// 該当エンドポイントはリクエスト時に失敗する。
#[derive(Clone)]
pub struct AppState {
    pub secrets: SecretResolver,
    pub geocoder: DynGeocoder,
    pub predictor: DynPredictionService,
    pub documents: Option<DynDocumentStore>,
    pub vertex_model: Option<String>,
}

impl AppState {
    /// Google Cloud のクライアントで状態を構築
    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;

        let tokens: Arc<dyn AccessTokenProvider> = match &config.static_access_token {
            Some(token) => Arc::new(StaticTokenProvider::new(token.clone())),
            None => Arc::new(MetadataTokenProvider::new(
                client.clone(),
                config.endpoints.metadata.clone(),
            )),
        };

        let secret_store = GoogleSecretStore::new(
            client.clone(),
            config.endpoints.secret_manager.clone(),
            tokens.clone(),
        );

        Ok(Self {
            secrets: SecretResolver::new(Arc::new(secret_store), config.maps_secret_name.clone()),
            geocoder: Arc::new(MapsGeocoder::new(
                client.clone(),
                config.endpoints.geocode.clone(),
            )),
            predictor: Arc::new(VertexPredictionService::new(
                client.clone(),
                config.endpoints.vertex.clone(),
                tokens.clone(),
            )),
            documents: config.project_id.as_ref().map(|project_id| {
                Arc::new(FirestoreDocumentStore::new(
                    client,
                    config.endpoints.firestore.clone(),
                    project_id.clone(),
                    tokens,
                )) as DynDocumentStore
            }),
            vertex_model: config.vertex_model.clone(),
        })
    }

    pub fn document_store(&self) -> AppResult<&DynDocumentStore> {
        self.documents
            .as_ref()
            .ok_or_else(|| AppError::Configuration("GCP_PROJECT not set".to_string()))
    }

    pub fn model(&self) -> AppResult<&str> {
        self.vertex_model
            .as_deref()
            .ok_or_else(|| AppError::Configuration("GCP_PROJECT not set".to_string()))
    }
}
