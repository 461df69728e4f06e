use serde::Deserialize;
use validator::Validate;

/// ジオコーディングリクエスト（クエリ文字列）
#[derive(Debug, Clone, Default, Validate)]
pub struct GeocodeQuery {
    #[validate(required, length(min = 1))]
    pub address: Option<String>,
}

impl GeocodeQuery {
    /// クエリのキーと値の組から組み立てる
    ///
    /// `address` が複数回指定された場合は出現順に `,` で連結する。
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let values: Vec<String> = pairs
            .into_iter()
            .filter(|(key, _)| key == "address")
            .map(|(_, value)| value)
            .collect();

        let address = if values.is_empty() {
            None
        } else {
            Some(values.join(","))
        };

        Self { address }
    }
}

/// テキスト生成リクエスト
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GenerateRequest {
    #[validate(required, length(min = 1))]
    pub prompt: Option<String>,
}

/// メッセージ作成リクエスト
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateMessageRequest {
    #[validate(required, length(min = 1))]
    pub user: Option<String>,

    #[validate(required, length(min = 1))]
    pub text: Option<String>,
}
