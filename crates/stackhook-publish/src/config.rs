//! 検証済みの docker 設定

use serde::Deserialize;

/// タグ未指定時のデフォルト
pub const DEFAULT_TAG: &str = "latest";

/// コンテナエンジンのデフォルトバイナリ
pub const DEFAULT_CLI: &str = "docker";

/// `custom.docker` ブロック
///
/// [`crate::schema::validate_docker_config`] を通したものだけを扱う。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockerConfig {
    pub name: String,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub cli: Option<String>,
    #[serde(default)]
    pub build_args: Option<String>,
}

impl DockerConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: None,
            cli: None,
            build_args: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn image_name(&self) -> &str {
        self.name.trim()
    }

    /// 空白のみ・未指定なら "latest"
    pub fn image_tag(&self) -> &str {
        self.tag
            .as_deref()
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .unwrap_or(DEFAULT_TAG)
    }

    /// `<name>:<tag>`
    pub fn image(&self) -> String {
        format!("{}:{}", self.image_name(), self.image_tag())
    }

    /// ビルド引数を解決
    ///
    /// 設定の buildArgs の後に環境変数分を連結し、空白で分割する
    pub fn build_args(&self, extra: Option<&str>) -> Vec<String> {
        self.build_args
            .as_deref()
            .into_iter()
            .chain(extra)
            .flat_map(str::split_whitespace)
            .map(str::to_string)
            .collect()
    }

    /// 使用するエンジンバイナリ
    ///
    /// # Priority
    /// 1. custom.docker.cli
    /// 2. 環境変数 (SLS_DOCKER_CLI)
    /// 3. "docker"
    pub fn engine_cli(&self, env_override: Option<&str>) -> String {
        self.cli
            .as_deref()
            .or(env_override)
            .unwrap_or(DEFAULT_CLI)
            .to_string()
    }
}
