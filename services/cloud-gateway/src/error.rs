use thiserror::Error;

use crate::clients::UpstreamError;

/// リクエスト処理中のエラー
///
/// 400 になるのは `BadRequest` のみ。それ以外はエンドポイントごとの 500 応答に変換される。
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

pub type AppResult<T> = Result<T, AppError>;
