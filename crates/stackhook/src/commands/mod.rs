pub mod build;
pub mod hook;
pub mod render;
pub mod resolve;
pub mod validate;

use anyhow::Context as _;
use stackhook_config::{PluginEnv, ProjectConfig};
use std::path::{Path, PathBuf};

/// コマンド共通の実行コンテキスト
pub struct Context {
    pub config_path: Option<PathBuf>,
    pub region: Option<String>,
    pub env: PluginEnv,
}

impl Context {
    /// プロジェクトファイルのパス（--config > 自動探索）
    pub fn project_path(&self) -> anyhow::Result<PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => Ok(stackhook_config::find_project_file()?),
        }
    }

    pub fn load_project(&self) -> anyhow::Result<(PathBuf, ProjectConfig)> {
        let path = self.project_path()?;
        let project = stackhook_config::load_project_file(&path)
            .with_context(|| format!("{} を読み込めませんでした", path.display()))?;
        Ok((path, project))
    }

    /// プロジェクトファイルが無くても動くコマンド向け
    pub fn try_load_project(&self) -> Option<ProjectConfig> {
        match self.load_project() {
            Ok((_, project)) => Some(project),
            Err(e) => {
                tracing::debug!("Project file not loaded: {:#}", e);
                None
            }
        }
    }

    pub fn region(&self, project: Option<&ProjectConfig>) -> String {
        project
            .cloned()
            .unwrap_or_default()
            .region(self.region.as_deref(), &self.env)
    }
}

/// プロジェクトファイルのあるディレクトリ
pub fn project_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
