//! イメージ公開処理
//!
//! `Idle -> Validated -> DaemonChecked -> Authenticated -> Built -> Tagged -> Pushed`
//! の順に一方向で進む。いずれかのステップで失敗した時点で中断し、
//! それまでの結果（ビルド済みイメージなど）は残したままにする。

use crate::config::DockerConfig;
use crate::engine::ContainerEngine;
use crate::error::{PublishError, PublishResult};
use crate::process::CommandRunner;
use crate::registry::{ECR_USERNAME, EcrRegistry};
use crate::schema::validate_docker_config;
use stackhook_cloud_aws::IdentityApi;
use std::sync::Arc;

/// 公開処理の到達段階
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PublishStage {
    Idle,
    Validated,
    DaemonChecked,
    Authenticated,
    Built,
    Tagged,
    Pushed,
}

/// 環境由来の設定
#[derive(Debug, Clone, Default)]
pub struct PublisherSettings {
    pub region: String,
    /// SLS_DOCKER_CLI
    pub cli_override: Option<String>,
    /// SLS_DOCKER_ARGS
    pub extra_build_args: Option<String>,
}

/// プッシュ結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedImage {
    pub local: String,
    pub remote: String,
}

pub struct ImagePublisher {
    raw_config: serde_json::Value,
    settings: PublisherSettings,
    runner: Arc<dyn CommandRunner>,
    registry: EcrRegistry,
    stage: PublishStage,
}

impl ImagePublisher {
    pub fn new(
        raw_config: serde_json::Value,
        settings: PublisherSettings,
        identity: Arc<dyn IdentityApi>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        let registry = EcrRegistry::new(identity, Arc::clone(&runner), settings.region.clone());
        Self {
            raw_config,
            settings,
            runner,
            registry,
            stage: PublishStage::Idle,
        }
    }

    /// 直近の build() が到達した段階
    pub fn stage(&self) -> PublishStage {
        self.stage
    }

    pub fn registry(&self) -> &EcrRegistry {
        &self.registry
    }

    /// 設定を検証
    pub fn validate(&mut self) -> PublishResult<DockerConfig> {
        let config = validate_docker_config(&self.raw_config)?;
        self.stage = PublishStage::Validated;
        Ok(config)
    }

    pub fn engine(&self, config: &DockerConfig) -> ContainerEngine {
        ContainerEngine::new(
            config.engine_cli(self.settings.cli_override.as_deref()),
            Arc::clone(&self.runner),
        )
    }

    /// ローカルのイメージ名 `<name>:<tag>`
    pub fn image(&self) -> PublishResult<String> {
        Ok(validate_docker_config(&self.raw_config)?.image())
    }

    pub async fn is_daemon_running(&self, config: &DockerConfig) -> bool {
        self.engine(config).is_daemon_running().await
    }

    /// ECR へログイン
    pub async fn authenticate(&mut self, config: &DockerConfig) -> PublishResult<()> {
        let registry = self.registry.host().await?;
        let password = self.registry.login_password().await?;
        self.engine(config)
            .login(&registry, ECR_USERNAME, &password)
            .await?;
        tracing::debug!("Authenticated the Docker CLI to the Amazon ECR registry");
        self.stage = PublishStage::Authenticated;
        Ok(())
    }

    /// カレントディレクトリをコンテキストにビルド
    pub async fn build_image(&mut self, config: &DockerConfig) -> PublishResult<()> {
        let build_args = config.build_args(self.settings.extra_build_args.as_deref());
        self.engine(config)
            .build(&build_args, &config.image())
            .await?;
        self.stage = PublishStage::Built;
        Ok(())
    }

    /// レジストリ用にタグ付けしてプッシュ
    pub async fn push_image(&mut self, config: &DockerConfig) -> PublishResult<String> {
        let local = config.image();
        let remote = self.registry.image_uri(&local).await?;
        let engine = self.engine(config);

        engine.tag(&local, &remote).await?;
        self.stage = PublishStage::Tagged;

        engine.push(&remote).await?;
        self.stage = PublishStage::Pushed;
        Ok(remote)
    }

    /// フックから呼ばれるエントリポイント
    ///
    /// 毎回最初からやり直す（前回の進捗は持ち越さない）
    pub async fn build(&mut self) -> PublishResult<PublishedImage> {
        self.stage = PublishStage::Idle;

        let config = self.validate()?;

        let engine = self.engine(&config);
        if !engine.is_daemon_running().await {
            return Err(PublishError::DaemonNotRunning {
                cli: engine.program().to_string(),
            });
        }
        self.stage = PublishStage::DaemonChecked;

        self.authenticate(&config).await?;
        self.build_image(&config).await?;
        let remote = self.push_image(&config).await?;

        tracing::info!("Pushed {}", remote);
        Ok(PublishedImage {
            local: config.image(),
            remote,
        })
    }
}
