//! プロジェクトファイルの読み込み
//!
//! ホストフレームワークの serverless.yml のうち、プラグインが使う
//! `provider.region` と `custom.docker` だけを取り出します。
//! docker ブロックは未検証のまま `serde_json::Value` で保持し、
//! スキーマ検証は stackhook-publish 側で行います。

use crate::env::PluginEnv;
use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::path::Path;

/// provider.region が無い場合のリージョン
pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub provider: ProviderSection,
    #[serde(default)]
    pub custom: CustomSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSection {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomSection {
    /// `custom.docker` ブロック（未検証）
    #[serde(default)]
    pub docker: Option<serde_json::Value>,
}

impl ProjectConfig {
    /// YAML 文字列から読み込み
    pub fn from_yaml(content: &str, path: &Path) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// リージョンを解決
    ///
    /// 優先順位: CLI 指定 > provider.region > 環境変数 > us-east-1
    pub fn region(&self, cli_region: Option<&str>, env: &PluginEnv) -> String {
        cli_region
            .map(str::to_string)
            .or_else(|| self.provider.region.clone())
            .or_else(|| env.region.clone())
            .unwrap_or_else(|| DEFAULT_REGION.to_string())
    }

    /// docker ブロック。未定義なら空オブジェクト
    pub fn docker_block(&self) -> serde_json::Value {
        self.custom
            .docker
            .clone()
            .unwrap_or_else(|| serde_json::Value::Object(Default::default()))
    }
}

/// プロジェクトファイルを読み込む
pub fn load_project_file(path: &Path) -> Result<ProjectConfig> {
    tracing::debug!("Loading project file: {}", path.display());
    let content = std::fs::read_to_string(path)?;
    ProjectConfig::from_yaml(&content, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SAMPLE: &str = r#"
service: orders
provider:
  name: aws
  region: eu-central-1
custom:
  docker:
    name: orders-api
    tag: v2
    buildArgs: "--build-arg STAGE=dev"
functions:
  api:
    image: orders-api
"#;

    #[test]
    fn test_load_project_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("serverless.yml");
        fs::write(&path, SAMPLE).unwrap();

        let project = load_project_file(&path).unwrap();
        assert_eq!(project.service.as_deref(), Some("orders"));
        assert_eq!(project.provider.region.as_deref(), Some("eu-central-1"));

        let docker = project.docker_block();
        assert_eq!(docker["name"], "orders-api");
        assert_eq!(docker["buildArgs"], "--build-arg STAGE=dev");
    }

    #[test]
    fn test_missing_sections_default() {
        let project = ProjectConfig::from_yaml("service: bare", Path::new("x.yml")).unwrap();
        assert!(project.custom.docker.is_none());
        assert_eq!(project.docker_block(), serde_json::json!({}));
    }

    #[test]
    fn test_region_priority() {
        let env = PluginEnv {
            region: Some("us-west-2".to_string()),
            ..Default::default()
        };
        let mut project = ProjectConfig::default();
        assert_eq!(project.region(None, &env), "us-west-2");
        assert_eq!(project.region(None, &PluginEnv::default()), DEFAULT_REGION);

        project.provider.region = Some("eu-west-1".to_string());
        assert_eq!(project.region(None, &env), "eu-west-1");
        assert_eq!(project.region(Some("ap-south-1"), &env), "ap-south-1");
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let result = ProjectConfig::from_yaml("provider: [unclosed", Path::new("bad.yml"));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
