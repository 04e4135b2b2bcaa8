/// バケット一覧ハンドラー
///
/// Lambda呼び出しごとにバケット一覧を取得し、レスポンスエンベロープに変換する。
use serde_json::Value;
use tracing::{error, info};

use crate::domain::{ResponseEnvelope, ERROR_MESSAGE_PREFIX};
use crate::infrastructure::BucketLister;

/// バケット一覧取得リクエストを処理するハンドラー
///
/// 外部呼び出しの失敗は500レスポンスに変換され、呼び出し元には伝播しない。
pub struct ListBucketsHandler<L>
where
    L: BucketLister,
{
    /// バケット一覧取得
    lister: L,
}

impl<L> ListBucketsHandler<L>
where
    L: BucketLister,
{
    /// 新しいListBucketsHandlerを作成
    pub fn new(lister: L) -> Self {
        Self { lister }
    }

    /// 呼び出しイベントを処理
    ///
    /// # 処理フロー
    /// 1. 受信したイベントをJSON（インデント付き）でログ出力
    /// 2. BucketListerでバケット一覧を取得
    /// 3. 成功時はバケット名の配列を含む200、失敗時はエラー内容を含む500を返す
    ///
    /// # 引数
    /// * `event` - プラットフォームから渡されたイベント（ログ出力のみに使用）
    pub async fn handle(&self, event: &Value) -> ResponseEnvelope {
        let event_json = serde_json::to_string_pretty(event).unwrap_or_else(|_| event.to_string());
        info!(event = %event_json, "Received event");

        match self.lister.list_buckets().await {
            Ok(buckets) => {
                let names: Vec<String> = buckets.into_iter().map(|bucket| bucket.name).collect();
                info!(bucket_count = names.len(), "バケット一覧を取得");
                ResponseEnvelope::success(names)
            }
            Err(err) => {
                error!(error = %err, "{}: {}", ERROR_MESSAGE_PREFIX, err);
                ResponseEnvelope::failure(&err)
            }
        }
    }
}
