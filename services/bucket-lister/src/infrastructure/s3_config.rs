/// S3クライアント設定
///
/// 認証情報とリージョンはaws-configの標準プロバイダチェーンで解決する。
/// エンドポイントの上書き（LocalStack, MinIO等）のみ環境変数で指定できる。
use aws_sdk_s3::Client as S3Client;
use tracing::{info, warn};

/// 環境変数名: S3エンドポイントURLの上書き
pub const ENV_S3_ENDPOINT_URL: &str = "S3_ENDPOINT_URL";

/// 環境変数名: パス形式アドレッシングの強制
pub const ENV_S3_FORCE_PATH_STYLE: &str = "S3_FORCE_PATH_STYLE";

/// S3クライアント設定
#[derive(Debug, Clone, Default, PartialEq)]
pub struct S3ClientConfig {
    /// エンドポイントURL（未設定ならAWSの標準エンドポイント）
    endpoint_url: Option<String>,
    /// パス形式アドレッシングを使うかどうか
    force_path_style: bool,
}

impl S3ClientConfig {
    /// 明示的な値で新しいS3ClientConfigを作成（テスト用）
    pub fn new(endpoint_url: Option<String>, force_path_style: bool) -> Self {
        Self {
            endpoint_url,
            force_path_style,
        }
    }

    /// 環境変数から設定を読み込み
    ///
    /// # 環境変数
    /// - S3_ENDPOINT_URL: エンドポイントURL（空文字は未設定扱い）
    /// - S3_FORCE_PATH_STYLE: `true`/`1`/`yes`で有効（デフォルト: false）
    pub fn from_env() -> Self {
        let endpoint_url = std::env::var(ENV_S3_ENDPOINT_URL)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let force_path_style = parse_env_bool(ENV_S3_FORCE_PATH_STYLE, false);

        info!(
            endpoint_url = endpoint_url.as_deref().unwrap_or("(default)"),
            force_path_style,
            "S3ClientConfig loaded"
        );

        Self {
            endpoint_url,
            force_path_style,
        }
    }

    /// AWS設定を読み込み、この設定を反映したS3クライアントを作成
    pub async fn build_client(&self) -> S3Client {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

        let mut builder =
            aws_sdk_s3::config::Builder::from(&aws_config).force_path_style(self.force_path_style);
        if let Some(endpoint_url) = &self.endpoint_url {
            builder = builder.endpoint_url(endpoint_url);
        }

        S3Client::from_conf(builder.build())
    }
}

/// 環境変数から真偽値を読み込む
///
/// 未設定またはパースエラーの場合はデフォルト値を返す。
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" | "" => false,
            _ => {
                warn!(
                    key,
                    value = %value,
                    default,
                    "Invalid boolean environment variable, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}
