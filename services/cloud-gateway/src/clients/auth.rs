use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{AccessTokenProvider, UpstreamError, UpstreamResult};

const TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";

/// 固定トークン（ローカル開発用、`GOOGLE_OAUTH_ACCESS_TOKEN`）
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> UpstreamResult<String> {
        Ok(self.token.clone())
    }
}

/// メタデータサーバーからサービスアカウントのトークンを取得
pub struct MetadataTokenProvider {
    client: Client,
    endpoint: String,
}

impl MetadataTokenProvider {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[async_trait]
impl AccessTokenProvider for MetadataTokenProvider {
    async fn access_token(&self) -> UpstreamResult<String> {
        let url = format!("{}{}", self.endpoint.trim_end_matches('/'), TOKEN_PATH);

        let response = self
            .client
            .get(&url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { status, body });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        Ok(token.access_token)
    }
}
