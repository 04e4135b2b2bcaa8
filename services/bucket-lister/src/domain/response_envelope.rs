// レスポンスエンベロープ
//
// Lambdaプロキシ統合形式（statusCode + body）のレスポンスと、
// bodyに格納するJSONオブジェクトの構造を定義する。

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::error;

/// バケット一覧取得成功時のメッセージ
pub const SUCCESS_MESSAGE: &str = "Successfully retrieved buckets";

/// バケット一覧取得失敗時のメッセージ接頭辞
pub const ERROR_MESSAGE_PREFIX: &str = "Error listing buckets";

/// bodyのエンコード失敗時に返す固定JSON
const BODY_ENCODING_FAILURE: &str = r#"{"message":"Error encoding response body"}"#;

/// 成功時のbody
///
/// `{"message": "...", "buckets": ["a", "b"]}` の順でシリアライズされる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListBucketsBody {
    /// 成功メッセージ
    pub message: String,
    /// バケット名の配列（取得順）
    pub buckets: Vec<String>,
}

impl ListBucketsBody {
    /// バケット名の配列から成功bodyを作成
    pub fn new(buckets: Vec<String>) -> Self {
        Self {
            message: SUCCESS_MESSAGE.to_string(),
            buckets,
        }
    }
}

/// 失敗時のbody
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// `Error listing buckets: <エラー内容>` 形式のメッセージ
    pub message: String,
}

impl ErrorBody {
    /// エラーの文字列表現から失敗bodyを作成
    pub fn from_error(err: impl Display) -> Self {
        Self {
            message: format!("{}: {}", ERROR_MESSAGE_PREFIX, err),
        }
    }
}

/// Lambdaのレスポンスエンベロープ
///
/// `body` はJSONエンコード済みの文字列。
/// 呼び出し元（API Gateway等）がそのままHTTPレスポンスとして扱える形式。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// HTTPステータスコード
    pub status_code: u16,
    /// JSONエンコード済みのbody
    pub body: String,
}

impl ResponseEnvelope {
    /// 成功時のステータスコード
    pub const STATUS_OK: u16 = 200;

    /// 失敗時のステータスコード
    pub const STATUS_INTERNAL_ERROR: u16 = 500;

    /// バケット名の配列から200レスポンスを作成
    pub fn success(buckets: Vec<String>) -> Self {
        Self::with_body(Self::STATUS_OK, &ListBucketsBody::new(buckets))
    }

    /// エラーから500レスポンスを作成
    pub fn failure(err: impl Display) -> Self {
        Self::with_body(Self::STATUS_INTERNAL_ERROR, &ErrorBody::from_error(err))
    }

    fn with_body<T: Serialize>(status_code: u16, body: &T) -> Self {
        // 文字列とベクターのみの構造体なので実際には失敗しない
        let body = serde_json::to_string(body).unwrap_or_else(|err| {
            error!(error = %err, "レスポンスbodyのエンコードに失敗");
            BODY_ENCODING_FAILURE.to_string()
        });

        Self { status_code, body }
    }
}
