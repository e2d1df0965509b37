//! ECR レジストリ
//!
//! アカウント ID (STS) とリージョンからレジストリホストを組み立て、
//! `aws ecr get-login-password` でログインパスワードを取得します。

use crate::error::{PublishError, PublishResult, PublishStep};
use crate::process::{CommandRunner, CommandSpec};
use stackhook_cloud_aws::IdentityApi;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// ECR ログイン時のユーザー名
pub const ECR_USERNAME: &str = "AWS";

/// aws CLI のバイナリ
pub const AWS_CLI: &str = "aws";

/// リージョンに対応するドメイン
///
/// 中国リージョン (cn-*) のみ amazonaws.com.cn
pub fn registry_domain(region: &str) -> &'static str {
    if region.starts_with("cn-") {
        "amazonaws.com.cn"
    } else {
        "amazonaws.com"
    }
}

/// `<accountId>.dkr.ecr.<region>.<domain>`
pub fn ecr_registry_host(account_id: &str, region: &str) -> String {
    format!(
        "{}.dkr.ecr.{}.{}",
        account_id,
        region,
        registry_domain(region)
    )
}

pub struct EcrRegistry {
    identity: Arc<dyn IdentityApi>,
    runner: Arc<dyn CommandRunner>,
    region: String,
    account_id: OnceCell<String>,
}

impl EcrRegistry {
    pub fn new(
        identity: Arc<dyn IdentityApi>,
        runner: Arc<dyn CommandRunner>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            identity,
            runner,
            region: region.into(),
            account_id: OnceCell::new(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// アカウント ID（初回のみ STS に問い合わせ）
    pub async fn account_id(&self) -> PublishResult<String> {
        let account_id = self
            .account_id
            .get_or_try_init(|| async {
                let id = self.identity.account_id().await?;
                tracing::debug!("AWS account ID: {}", id);
                Ok::<_, PublishError>(id)
            })
            .await?;
        Ok(account_id.clone())
    }

    pub async fn host(&self) -> PublishResult<String> {
        let account_id = self.account_id().await?;
        Ok(ecr_registry_host(&account_id, &self.region))
    }

    /// レジストリ上のイメージ URI
    pub async fn image_uri(&self, image: &str) -> PublishResult<String> {
        Ok(format!("{}/{}", self.host().await?, image))
    }

    /// `aws ecr get-login-password --region <region>` の出力
    pub async fn login_password(&self) -> PublishResult<String> {
        let spec = CommandSpec::new(AWS_CLI)
            .args(["ecr", "get-login-password", "--region", self.region.as_str()])
            .capture_stdout();

        let output = self.runner.run(&spec).await.map_err(|e| {
            PublishError::step(
                PublishStep::Authenticate,
                format!("failed to run `{}`: {}", AWS_CLI, e),
            )
        })?;

        if !output.success() {
            return Err(PublishError::step(
                PublishStep::Authenticate,
                format!("`{}` {}", spec.command_line(), output.describe_failure()),
            ));
        }

        Ok(output.stdout_text().trim().to_string())
    }
}
