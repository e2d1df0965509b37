use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "プロジェクトファイルが見つかりません。以下の場所を確認してください:\n\
        - カレントディレクトリ: serverless.local.yml, serverless.yml, serverless.yaml\n\
        - ~/.config/stackhook/serverless.yml\n\
        または STACKHOOK_CONFIG_PATH 環境変数で直接指定できます"
    )]
    ProjectFileNotFound,

    #[error("プロジェクトファイルの解析に失敗しました ({path}): {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
