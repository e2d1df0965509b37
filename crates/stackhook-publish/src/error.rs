use stackhook_cloud_aws::CloudAwsError;
use std::fmt;
use thiserror::Error;

/// 失敗したステップ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStep {
    Authenticate,
    Build,
    Tag,
    Push,
}

impl fmt::Display for PublishStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PublishStep::Authenticate => "Docker authentication error",
            PublishStep::Build => "Build of the docker image failed",
            PublishStep::Tag => "Unable to tag the image",
            PublishStep::Push => "Unable to push the image to the AWS registry",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Invalid docker configuration: `{field}` {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Docker daemon is not running (cli: {cli})")]
    DaemonNotRunning { cli: String },

    #[error("{step}: {message}")]
    StepFailed { step: PublishStep, message: String },

    #[error(transparent)]
    Cloud(#[from] CloudAwsError),
}

impl PublishError {
    pub(crate) fn step(step: PublishStep, message: impl Into<String>) -> Self {
        Self::StepFailed {
            step,
            message: message.into(),
        }
    }

    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// ユーザー向けの分かりやすいエラーメッセージ
    pub fn user_message(&self) -> String {
        match self {
            PublishError::InvalidConfig { .. } => {
                format!(
                    "{}\n\
                     \n\
                     serverless.yml の custom.docker を確認してください:\n\
                       custom:\n\
                         docker:\n\
                           name: my-app\n\
                           tag: latest",
                    self
                )
            }
            PublishError::DaemonNotRunning { cli } => {
                format!(
                    "{}\n\
                     \n\
                     解決方法:\n\
                     1. Docker (または {}) を起動してください\n\
                     2. 別のエンジンを使う場合は SLS_DOCKER_CLI か custom.docker.cli で指定してください",
                    self, cli
                )
            }
            PublishError::StepFailed {
                step: PublishStep::Authenticate,
                ..
            } => {
                format!(
                    "{}\n\
                     \n\
                     aws CLI がインストールされ、ECR へのアクセス権があるか確認してください。",
                    self
                )
            }
            _ => format!("{}", self),
        }
    }
}

pub type PublishResult<T> = std::result::Result<T, PublishError>;
