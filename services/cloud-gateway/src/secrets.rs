use std::sync::Arc;

use crate::clients::SecretStore;
use crate::error::{AppError, AppResult};

pub type DynSecretStore = Arc<dyn SecretStore>;

/// シークレット解決
///
/// 呼び出しごとにストアへ問い合わせる（キャッシュなし、リトライなし）。
#[derive(Clone)]
pub struct SecretResolver {
    store: DynSecretStore,
    geocode_key_ref: Option<String>,
}

impl SecretResolver {
    pub fn new(store: DynSecretStore, geocode_key_ref: Option<String>) -> Self {
        Self {
            store,
            geocode_key_ref,
        }
    }

    /// 完全修飾のシークレット参照から現在の値を取得
    pub async fn resolve(&self, reference: &str) -> AppResult<String> {
        Ok(self.store.access(reference).await?)
    }

    /// ジオコーディング API キーを取得
    pub async fn geocode_api_key(&self) -> AppResult<String> {
        let reference = self
            .geocode_key_ref
            .as_deref()
            .ok_or_else(|| AppError::Configuration("MAPS_SECRET_NAME not set".to_string()))?;

        self.resolve(reference).await
    }
}
