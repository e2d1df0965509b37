//! stackhook のイメージ公開機能
//!
//! デプロイ前のフックで、docker 設定の検証・デーモン確認・ECR ログイン・
//! ビルド・タグ付け・プッシュを順番に実行します。

pub mod config;
pub mod engine;
pub mod error;
pub mod hooks;
pub mod process;
pub mod publisher;
pub mod registry;
pub mod schema;

pub use config::{DEFAULT_CLI, DEFAULT_TAG, DockerConfig};
pub use engine::ContainerEngine;
pub use error::{PublishError, PublishResult, PublishStep};
pub use hooks::LifecycleHook;
pub use process::{CommandOutput, CommandRunner, CommandSpec, SystemRunner};
pub use publisher::{ImagePublisher, PublishStage, PublishedImage, PublisherSettings};
pub use registry::{EcrRegistry, ecr_registry_host, registry_domain};
pub use schema::validate_docker_config;
