//! エラー型
//!
//! シミュレーション中核の操作は失敗しないため、エラーは設定読み込みと
//! CLI・ランタイムの境界でのみ発生します。

use std::path::PathBuf;

use thiserror::Error;

/// 設定ファイル読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("設定ファイルが見つかりません: {0}")]
    FileNotFound(PathBuf),

    #[error("ファイル読み込みエラー {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("YAML解析エラー {0}: {1}")]
    Parse(PathBuf, #[source] serde_yaml::Error),

    #[error("検証エラー: {0}")]
    Validation(String),
}

/// アプリケーション全体のエラー
#[derive(Debug, Error)]
pub enum TacsimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("ログ初期化エラー: {0}")]
    Logging(String),

    #[error("ログディレクトリ作成エラー: {0}")]
    LogDirectory(#[source] std::io::Error),

    #[error("ランタイムエラー: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("タイマータスクが異常終了しました: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: TacsimError =
            ConfigError::Validation("tick_ms must be positive".to_string()).into();
        assert_eq!(err.to_string(), "検証エラー: tick_ms must be positive");
    }
}
