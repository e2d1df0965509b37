//! プラグインが参照する環境変数

/// デバッグ出力を有効化するフラグ
pub const DEBUG_VAR: &str = "SLS_DEBUG";
/// コンテナエンジンのバイナリ上書き
pub const DOCKER_CLI_VAR: &str = "SLS_DOCKER_CLI";
/// ビルド引数の追加分
pub const DOCKER_ARGS_VAR: &str = "SLS_DOCKER_ARGS";
/// プロジェクトファイルの直接指定
pub const CONFIG_PATH_VAR: &str = "STACKHOOK_CONFIG_PATH";

const REGION_VARS: [&str; 2] = ["AWS_REGION", "AWS_DEFAULT_REGION"];

/// 環境変数から読み取ったプラグイン設定
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginEnv {
    pub debug: bool,
    pub docker_cli: Option<String>,
    pub docker_args: Option<String>,
    pub region: Option<String>,
}

impl PluginEnv {
    /// 現在のプロセス環境から読み込み
    ///
    /// 空文字列は未設定として扱う。`SLS_DEBUG` は値の内容を問わず設定されていれば有効
    pub fn from_env() -> Self {
        let debug = non_empty(DEBUG_VAR).is_some();

        Self {
            debug,
            docker_cli: non_empty(DOCKER_CLI_VAR),
            docker_args: non_empty(DOCKER_ARGS_VAR),
            region: REGION_VARS.iter().find_map(|name| non_empty(name)),
        }
    }
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env_reads_overrides() {
        let env = temp_env::with_vars(
            [
                (DEBUG_VAR, Some("*")),
                (DOCKER_CLI_VAR, Some("podman")),
                (DOCKER_ARGS_VAR, Some("--pull --no-cache")),
                ("AWS_REGION", Some("eu-west-1")),
                ("AWS_DEFAULT_REGION", Some("us-west-2")),
            ],
            PluginEnv::from_env,
        );

        assert!(env.debug);
        assert_eq!(env.docker_cli.as_deref(), Some("podman"));
        assert_eq!(env.docker_args.as_deref(), Some("--pull --no-cache"));
        // AWS_REGION が優先される
        assert_eq!(env.region.as_deref(), Some("eu-west-1"));
    }

    #[test]
    #[serial]
    fn test_from_env_empty_values_are_unset() {
        let env = temp_env::with_vars(
            [
                (DEBUG_VAR, Some("")),
                (DOCKER_CLI_VAR, Some("   ")),
                (DOCKER_ARGS_VAR, None),
                ("AWS_REGION", None),
                ("AWS_DEFAULT_REGION", Some("ap-northeast-1")),
            ],
            PluginEnv::from_env,
        );

        assert!(!env.debug);
        assert_eq!(env.docker_cli, None);
        assert_eq!(env.docker_args, None);
        assert_eq!(env.region.as_deref(), Some("ap-northeast-1"));
    }

    #[test]
    #[serial]
    fn test_debug_any_value_enables() {
        for value in ["1", "0", "false", "*"] {
            let env = temp_env::with_var(DEBUG_VAR, Some(value), PluginEnv::from_env);
            assert!(env.debug, "SLS_DEBUG={value}");
        }
        let env = temp_env::with_var_unset(DEBUG_VAR, PluginEnv::from_env);
        assert!(!env.debug);
    }
}
