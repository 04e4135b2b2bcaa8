/// バケット一覧 Lambdaエントリポイント
///
/// 呼び出しごとにS3のListBucketsを実行し、
/// `{statusCode, body}` 形式のレスポンスを返す。
use bucket_lister::application::ListBucketsHandler;
use bucket_lister::domain::ResponseEnvelope;
use bucket_lister::infrastructure::{init_logging, BucketLister, S3BucketLister, S3ClientConfig};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // S3クライアントはコールドスタート時に一度だけ作成し、呼び出し間で再利用する
    let config = S3ClientConfig::from_env();
    let lister = S3BucketLister::from_config(&config).await;
    let list_handler = ListBucketsHandler::new(lister);

    info!("ListBuckets Lambda関数を初期化");

    lambda_runtime::run(service_fn(|event| handler(event, &list_handler))).await
}

/// Lambda関数のメインハンドラー
///
/// 外部呼び出しの成否に関わらず常に`Ok`を返す（失敗は500レスポンスに変換済み）。
async fn handler<L>(
    event: LambdaEvent<Value>,
    list_handler: &ListBucketsHandler<L>,
) -> Result<ResponseEnvelope, Error>
where
    L: BucketLister,
{
    let (payload, context) = event.into_parts();
    let span = tracing::info_span!("invocation", request_id = %context.request_id);

    let response = list_handler.handle(&payload).instrument(span).await;

    Ok(response)
}
