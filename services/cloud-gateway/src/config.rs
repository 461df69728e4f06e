use std::time::Duration;
use thiserror::Error;

const DEFAULT_REGION: &str = "europe-west1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MODEL_ID: &str = "text-bison@001";

const SECRET_MANAGER_ENDPOINT: &str = "https://secretmanager.googleapis.com";
const GEOCODE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const FIRESTORE_ENDPOINT: &str = "https://firestore.googleapis.com";
const METADATA_ENDPOINT: &str = "http://metadata.google.internal";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// 外部サービスのエンドポイント（テスト時に差し替え可能）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub secret_manager: String,
    pub geocode: String,
    pub vertex: String,
    pub firestore: String,
    pub metadata: String,
}

/// アプリケーション設定（起動時に一度だけ読み込む）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// 未設定でも起動は可能。Firestore と既定モデルの解決に使う。
    pub project_id: Option<String>,
    pub region: String,
    pub port: u16,
    /// ジオコーディング API キーのシークレット参照。未設定でも起動は可能。
    pub maps_secret_name: Option<String>,
    /// `VERTEX_MODEL`、なければプロジェクトから導いた既定モデル
    pub vertex_model: Option<String>,
    pub upstream_timeout: Duration,
    pub static_access_token: Option<String>,
    pub endpoints: Endpoints,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のキー参照関数から設定を組み立てる
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let project_id = get("GCP_PROJECT").or_else(|| get("PROJECT_ID"));
        let region = get("REGION").unwrap_or_else(|| DEFAULT_REGION.to_string());

        let port = match get("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: "UPSTREAM_TIMEOUT_SECS",
                value,
            })?,
            None => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };

        let vertex_model = get("VERTEX_MODEL").or_else(|| {
            project_id
                .as_deref()
                .map(|project| default_model_resource(project, &region))
        });

        let endpoints = Endpoints {
            secret_manager: get("SECRET_MANAGER_ENDPOINT")
                .unwrap_or_else(|| SECRET_MANAGER_ENDPOINT.to_string()),
            geocode: get("GEOCODE_ENDPOINT").unwrap_or_else(|| GEOCODE_ENDPOINT.to_string()),
            vertex: get("VERTEX_ENDPOINT")
                .unwrap_or_else(|| format!("https://{}-aiplatform.googleapis.com", region)),
            firestore: get("FIRESTORE_ENDPOINT").unwrap_or_else(|| FIRESTORE_ENDPOINT.to_string()),
            metadata: get("METADATA_ENDPOINT").unwrap_or_else(|| METADATA_ENDPOINT.to_string()),
        };

        Ok(Self {
            project_id,
            region,
            port,
            maps_secret_name: get("MAPS_SECRET_NAME"),
            vertex_model,
            upstream_timeout: Duration::from_secs(timeout_secs),
            static_access_token: get("GOOGLE_OAUTH_ACCESS_TOKEN"),
            endpoints,
        })
    }
}

/// 既定の生成モデルのリソース名
pub fn default_model_resource(project_id: &str, region: &str) -> String {
    format!(
        "projects/{}/locations/{}/publishers/google/models/{}",
        project_id, region, DEFAULT_MODEL_ID
    )
}
