//! コンテナエンジン CLI のラッパー
//!
//! docker / podman / finch など、docker 互換のサブコマンドを持つ CLI を想定。

use crate::error::{PublishError, PublishResult, PublishStep};
use crate::process::{CommandOutput, CommandRunner, CommandSpec};
use std::sync::Arc;

pub struct ContainerEngine {
    program: String,
    runner: Arc<dyn CommandRunner>,
}

impl ContainerEngine {
    pub fn new(program: impl Into<String>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self) -> CommandSpec {
        CommandSpec::new(&self.program)
    }

    async fn run_step(&self, step: PublishStep, spec: CommandSpec) -> PublishResult<CommandOutput> {
        let output = self.runner.run(&spec).await.map_err(|e| {
            PublishError::step(step, format!("failed to run `{}`: {}", spec.program, e))
        })?;

        if !output.success() {
            tracing::debug!("`{}` failed: {}", spec.command_line(), output.describe_failure());
            return Err(PublishError::step(
                step,
                format!("`{}` {}", spec.command_line(), output.describe_failure()),
            ));
        }

        Ok(output)
    }

    /// `<engine> version` が 0 で終了すれば true
    pub async fn is_daemon_running(&self) -> bool {
        match self.runner.run(&self.command().arg("version")).await {
            Ok(output) => output.success(),
            Err(e) => {
                tracing::debug!("Failed to run {} version: {}", self.program, e);
                false
            }
        }
    }

    /// `<engine> login --username <user> --password-stdin <registry>`
    pub async fn login(&self, registry: &str, username: &str, password: &str) -> PublishResult<()> {
        let spec = self
            .command()
            .args(["login", "--username", username, "--password-stdin", registry])
            .stdin(password.as_bytes().to_vec());
        self.run_step(PublishStep::Authenticate, spec).await?;
        Ok(())
    }

    /// `<engine> build <args…> -t <image> .`
    pub async fn build(&self, build_args: &[String], image: &str) -> PublishResult<()> {
        tracing::info!("Building image: {}", image);
        let spec = self
            .command()
            .arg("build")
            .args(build_args.iter().cloned())
            .args(["-t", image, "."]);
        self.run_step(PublishStep::Build, spec).await?;
        tracing::info!("Successfully built: {}", image);
        Ok(())
    }

    /// `<engine> tag <source> <target>`
    pub async fn tag(&self, source: &str, target: &str) -> PublishResult<()> {
        let spec = self.command().args(["tag", source, target]);
        self.run_step(PublishStep::Tag, spec).await?;
        Ok(())
    }

    /// `<engine> push <image>`
    pub async fn push(&self, image: &str) -> PublishResult<()> {
        tracing::info!("Pushing image: {}", image);
        let spec = self.command().args(["push", image]);
        self.run_step(PublishStep::Push, spec).await?;
        Ok(())
    }
}
