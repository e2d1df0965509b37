//! stackhook の設定まわり
//!
//! プロジェクトファイル (serverless.yml 形式) の探索と読み込み、
//! プラグインが参照する環境変数の取得を担当します。

pub mod env;
pub mod error;
pub mod project;

pub use env::PluginEnv;
pub use error::*;
pub use project::{CustomSection, DEFAULT_REGION, ProjectConfig, ProviderSection, load_project_file};

use std::path::PathBuf;

/// プロジェクトファイルの候補（優先順）
pub const PROJECT_FILE_CANDIDATES: [&str; 3] =
    ["serverless.local.yml", "serverless.yml", "serverless.yaml"];

/// プロジェクトファイルを探す
///
/// 以下の優先順位で検索:
/// 1. 環境変数 STACKHOOK_CONFIG_PATH (直接パス指定)
/// 2. カレントディレクトリ: serverless.local.yml, serverless.yml, serverless.yaml
/// 3. ~/.config/stackhook/serverless.yml (グローバル設定)
pub fn find_project_file() -> Result<PathBuf> {
    // 1. 環境変数で直接指定
    if let Ok(config_path) = std::env::var(env::CONFIG_PATH_VAR) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(path);
        }
        tracing::debug!("{} points to a missing file: {:?}", env::CONFIG_PATH_VAR, path);
    }

    // 2. カレントディレクトリで検索
    let current_dir = std::env::current_dir()?;
    for filename in &PROJECT_FILE_CANDIDATES {
        let path = current_dir.join(filename);
        if path.exists() {
            return Ok(path);
        }
    }

    // 3. グローバル設定ファイル
    if let Some(config_dir) = dirs::config_dir() {
        let global_config = config_dir.join("stackhook").join("serverless.yml");
        if global_config.exists() {
            return Ok(global_config);
        }
    }

    Err(ConfigError::ProjectFileNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    #[test]
    #[serial]
    fn test_find_project_file_in_current_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let original_dir = std::env::current_dir().unwrap();

        fs::write(temp_dir.path().join("serverless.yml"), "service: test").unwrap();
        std::env::set_current_dir(&temp_dir).unwrap();

        let result = temp_env::with_var_unset(env::CONFIG_PATH_VAR, find_project_file);

        std::env::set_current_dir(original_dir).unwrap();
        assert!(result.unwrap().ends_with("serverless.yml"));
    }

    #[test]
    #[serial]
    fn test_find_project_file_local_priority() {
        let temp_dir = tempfile::tempdir().unwrap();
        let original_dir = std::env::current_dir().unwrap();

        fs::write(temp_dir.path().join("serverless.yml"), "service: shared").unwrap();
        fs::write(temp_dir.path().join("serverless.local.yml"), "service: local").unwrap();
        std::env::set_current_dir(&temp_dir).unwrap();

        let result = temp_env::with_var_unset(env::CONFIG_PATH_VAR, find_project_file);

        std::env::set_current_dir(original_dir).unwrap();
        // serverless.local.yml が優先される
        assert!(result.unwrap().ends_with("serverless.local.yml"));
    }

    #[test]
    #[serial]
    fn test_find_project_file_env_var() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("custom.yml");
        fs::write(&config_path, "service: custom").unwrap();

        let result = temp_env::with_var(
            env::CONFIG_PATH_VAR,
            Some(config_path.to_str().unwrap()),
            find_project_file,
        );

        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    #[serial]
    fn test_find_project_file_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(&temp_dir).unwrap();

        // グローバル設定も見えないように XDG_CONFIG_HOME / HOME を空ディレクトリへ向ける
        let result = temp_env::with_vars(
            [
                (env::CONFIG_PATH_VAR, None),
                ("XDG_CONFIG_HOME", temp_dir.path().to_str()),
                ("HOME", temp_dir.path().to_str()),
            ],
            find_project_file,
        );

        std::env::set_current_dir(original_dir).unwrap();
        assert!(matches!(result, Err(ConfigError::ProjectFileNotFound)));
    }
}
