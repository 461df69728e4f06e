use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::Record;

/// 外部サービス呼び出しのエラー
///
/// 表示文字列はすべて `Error: ` で始まる（生成エンドポイントの `details` にそのまま載る）。
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Error: request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Error: upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Error: invalid response: {0}")]
    Decode(String),

    #[error("Error: not found: {0}")]
    NotFound(String),

    #[error("Error: {0}")]
    Other(String),
}

pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// シークレットストア: バージョン指定済みのシークレット名から値を取得
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn access(&self, reference: &str) -> UpstreamResult<String>;
}

/// ジオコーディングサービス: 応答 JSON をそのまま返す
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str, api_key: &str) -> UpstreamResult<Value>;
}

/// 推論サービス
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(
        &self,
        endpoint: &str,
        instances: Vec<Value>,
        parameters: Value,
    ) -> UpstreamResult<Value>;
}

/// ドキュメントストア: 挿入したレコードに採番された ID を返す
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn add(&self, collection: &str, record: Record) -> UpstreamResult<String>;
}

/// Google API 呼び出し用のアクセストークン取得
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> UpstreamResult<String>;
}
