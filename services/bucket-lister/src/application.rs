// アプリケーション層モジュール
pub mod list_buckets_handler;

// 再エクスポート
pub use list_buckets_handler::ListBucketsHandler;
