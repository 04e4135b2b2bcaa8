//! バケット一覧取得モジュール
//!
//! 呼び出し元の認証情報でアクセス可能な全バケットを取得する外部操作を抽象化する。
//! - `BucketLister`: 外部操作のトレイト（テスト時はモックに差し替え）
//! - `S3BucketLister`: aws-sdk-s3のListBucketsを使った実装

use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::types::Bucket;
use aws_sdk_s3::Client as S3Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::infrastructure::S3ClientConfig;

/// バケット一覧取得のエラー型
///
/// 認可・ネットワーク・サービスエラーなど、外部呼び出しの失敗は全てこの1種類に集約する。
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BucketListError {
    /// 外部呼び出しの失敗（表示文字列はエラー内容そのもの）
    #[error("{0}")]
    ExternalCallFailure(String),
}

/// 取得したバケットの情報
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSummary {
    /// バケット名
    pub name: String,
}

impl BucketSummary {
    /// 名前のみのバケット情報を作成
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// SDKのBucketから変換する
    ///
    /// 名前を持たないレコードは`None`を返す（一覧から除外される）。
    /// 名前の欠落はエラー（500レスポンス）扱いにせず、そのレコードだけを読み飛ばす。
    pub fn from_sdk(bucket: &Bucket) -> Option<Self> {
        bucket.name().map(Self::new)
    }
}

/// バケット一覧取得トレイト（テスト用の抽象化）
#[async_trait]
pub trait BucketLister: Send + Sync {
    /// アクセス可能な全バケットをサービスが返した順序で取得する
    ///
    /// ページネーションは行わず、1回の呼び出し結果をそのまま返す。
    async fn list_buckets(&self) -> Result<Vec<BucketSummary>, BucketListError>;
}

/// 実際のAWS S3 SDKを使用したバケット一覧取得実装
///
/// クライアントはコールドスタート時に一度だけ作成し、呼び出し間で共有する。
#[derive(Debug, Clone)]
pub struct S3BucketLister {
    client: S3Client,
}

impl S3BucketLister {
    /// 新しいS3BucketListerを作成
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }

    /// 環境設定からクライアントを作成
    pub async fn from_config(config: &S3ClientConfig) -> Self {
        Self::new(config.build_client().await)
    }
}

#[async_trait]
impl BucketLister for S3BucketLister {
    async fn list_buckets(&self) -> Result<Vec<BucketSummary>, BucketListError> {
        let output = self.client.list_buckets().send().await.map_err(|err| {
            warn!(error = %DisplayErrorContext(&err), "ListBucketsエラー");
            BucketListError::ExternalCallFailure(describe_sdk_error(&err))
        })?;

        let buckets: Vec<BucketSummary> = output
            .buckets()
            .iter()
            .filter_map(BucketSummary::from_sdk)
            .collect();

        debug!(bucket_count = buckets.len(), "ListBuckets成功");

        Ok(buckets)
    }
}

/// SDKエラーを人が読める1行の文字列に変換する
///
/// エラーコードを持つサービスエラーは
/// `An error occurred (<Code>) when calling the ListBuckets operation: <Message>` 形式。
/// それ以外（通信失敗、タイムアウト、認証情報なし等）は`Display`と
/// `source()`チェーンを`": "`で連結する（Debug表現はレスポンスに含めない）。
fn describe_sdk_error<E, R>(err: &SdkError<E, R>) -> String
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug + 'static,
{
    match err.code() {
        Some(code) => format!(
            "An error occurred ({}) when calling the ListBuckets operation: {}",
            code,
            err.message().unwrap_or("Unknown")
        ),
        None => error_chain_text(err),
    }
}

/// エラーと全ての原因を`Display`で連結する
fn error_chain_text(err: &(dyn std::error::Error + 'static)) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::domain::ResponseEnvelope;
    use aws_sdk_s3::error::ErrorMetadata;
    use aws_sdk_s3::operation::list_buckets::ListBucketsError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// テスト用のモックBucketLister
    #[derive(Debug, Clone)]
    pub struct MockBucketLister {
        /// list_bucketsが返す結果
        result: Result<Vec<BucketSummary>, BucketListError>,
        /// list_buckets呼び出し回数
        call_count: Arc<AtomicUsize>,
    }

    impl MockBucketLister {
        /// 指定した名前のバケットを返すモックを作成
        pub fn with_buckets(names: &[&str]) -> Self {
            Self {
                result: Ok(names.iter().map(|name| BucketSummary::new(*name)).collect()),
                call_count: Arc::new(AtomicUsize::new(0)),
            }
        }

        /// 指定したエラー文字列で失敗するモックを作成
        pub fn failing(message: &str) -> Self {
            Self {
                result: Err(BucketListError::ExternalCallFailure(message.to_string())),
                call_count: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl BucketLister for MockBucketLister {
        async fn list_buckets(&self) -> Result<Vec<BucketSummary>, BucketListError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    // ==================== BucketListError テスト ====================

    #[test]
    fn test_external_call_failure_display() {
        let error = BucketListError::ExternalCallFailure("AccessDenied".to_string());
        assert_eq!(error.to_string(), "AccessDenied");
    }

    // ==================== BucketSummary テスト ====================

    #[test]
    fn test_bucket_summary_from_sdk_with_name() {
        let bucket = Bucket::builder().name("my-bucket").build();

        let summary = BucketSummary::from_sdk(&bucket).unwrap();
        assert_eq!(summary, BucketSummary::new("my-bucket"));
    }

    #[test]
    fn test_bucket_summary_from_sdk_without_name_is_skipped() {
        let bucket = Bucket::builder().build();
        assert!(BucketSummary::from_sdk(&bucket).is_none());
    }

    #[test]
    fn test_bucket_summaries_preserve_order() {
        let buckets = vec![
            Bucket::builder().name("b").build(),
            Bucket::builder().build(),
            Bucket::builder().name("a").build(),
        ];

        let names: Vec<String> = buckets
            .iter()
            .filter_map(BucketSummary::from_sdk)
            .map(|summary| summary.name)
            .collect();

        assert_eq!(names, vec!["b", "a"]);
    }

    // ==================== describe_sdk_error テスト ====================

    #[test]
    fn test_describe_service_error_with_code() {
        let service_error = ListBucketsError::generic(
            ErrorMetadata::builder()
                .code("AccessDenied")
                .message("Access Denied")
                .build(),
        );
        let err: SdkError<ListBucketsError, ()> = SdkError::service_error(service_error, ());

        assert_eq!(
            describe_sdk_error(&err),
            "An error occurred (AccessDenied) when calling the ListBuckets operation: Access Denied"
        );
    }

    #[test]
    fn test_describe_service_error_without_message() {
        let service_error =
            ListBucketsError::generic(ErrorMetadata::builder().code("AccessDenied").build());
        let err: SdkError<ListBucketsError, ()> = SdkError::service_error(service_error, ());

        assert_eq!(
            describe_sdk_error(&err),
            "An error occurred (AccessDenied) when calling the ListBuckets operation: Unknown"
        );
    }

    #[test]
    fn test_describe_non_service_error_uses_source_chain() {
        let err: SdkError<ListBucketsError, ()> =
            SdkError::construction_failure("no region configured");

        let text = describe_sdk_error(&err);
        assert!(text.ends_with(": no region configured"), "got: {}", text);
        // Debug表現（構造体ダンプ）を含まない
        assert!(!text.contains('{'), "got: {}", text);
        assert!(!text.contains("ConstructionFailure("), "got: {}", text);
    }

    #[test]
    fn test_describe_timeout_error_has_no_debug_text() {
        let io_error = std::io::Error::new(std::io::ErrorKind::TimedOut, "operation timed out");
        let err: SdkError<ListBucketsError, ()> = SdkError::timeout_error(io_error);

        let text = describe_sdk_error(&err);
        assert!(text.ends_with(": operation timed out"), "got: {}", text);

        // 500レスポンスのbodyにもDebug表現が漏れない
        let body = ResponseEnvelope::failure(&text).body;
        assert!(!body.contains("TimeoutError("), "got: {}", body);
        assert!(!body.contains("Custom {"), "got: {}", body);
        assert!(!body.contains("kind:"), "got: {}", body);
    }

    #[test]
    fn test_error_chain_text_joins_sources() {
        let outer = ChainedError(std::io::Error::other("inner cause"));

        assert_eq!(error_chain_text(&outer), "outer failure: inner cause");
    }

    /// 原因を1つ持つテスト用エラー
    #[derive(Debug, Error)]
    #[error("outer failure")]
    struct ChainedError(#[source] std::io::Error);

    // ==================== MockBucketLister テスト ====================

    #[tokio::test]
    async fn test_mock_lister_counts_calls() {
        let lister = MockBucketLister::with_buckets(&["a", "b"]);

        let buckets = lister.list_buckets().await.unwrap();
        assert_eq!(buckets.len(), 2);
        assert_eq!(lister.call_count(), 1);
    }
}
