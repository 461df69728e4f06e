use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// ドキュメントストアのフィールド値
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    String(String),
    Timestamp(DateTime<Utc>),
}

/// ドキュメントストアに書き込む1件分のレコード
pub type Record = BTreeMap<String, FieldValue>;

/// メッセージの保存先コレクション
pub const MESSAGES_COLLECTION: &str = "messages";

/// メッセージエンティティ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub user: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// 書き込み時刻を付与してメッセージを作成
    pub fn new(user: String, text: String) -> Self {
        Self {
            user,
            text,
            created_at: Utc::now(),
        }
    }

    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("user".to_string(), FieldValue::String(self.user.clone()));
        record.insert("text".to_string(), FieldValue::String(self.text.clone()));
        record.insert(
            "createdAt".to_string(),
            FieldValue::Timestamp(self.created_at),
        );
        record
    }
}

/// メッセージ作成レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMessageResponse {
    pub ok: bool,
    pub id: String,
}

impl CreateMessageResponse {
    pub fn created(id: String) -> Self {
        Self { ok: true, id }
    }
}
