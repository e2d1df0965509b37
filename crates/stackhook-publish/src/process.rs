//! サブプロセス実行
//!
//! シェルを介さず program + argv で起動し、終了コードと出力を返す。
//! 子プロセスは `kill_on_drop` で起動するため、途中で失敗・キャンセルされても残らない。

use async_trait::async_trait;
use std::fmt;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// 起動するコマンド
#[derive(Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// 標準入力に流し込むデータ
    pub stdin: Option<Vec<u8>>,
    /// 標準出力を取得するか（デフォルトは破棄）
    pub capture_stdout: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
            capture_stdout: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn stdin(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    pub fn capture_stdout(mut self) -> Self {
        self.capture_stdout = true;
        self
    }

    /// ログ用のコマンドライン表記
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// stdin にはパスワードが入るので出力しない
impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("program", &self.program)
            .field("args", &self.args)
            .field("stdin", &self.stdin.as_ref().map(|_| "<redacted>"))
            .field("capture_stdout", &self.capture_stdout)
            .finish()
    }
}

/// 実行結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// 終了コード。シグナルで終了した場合は None
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    /// エラーメッセージ用の終了状態
    pub fn describe_failure(&self) -> String {
        let status = match self.code {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        };
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            status
        } else {
            format!("{}: {}", status, stderr)
        }
    }
}

/// コマンド実行の抽象
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// 起動に失敗した場合のみ Err。非ゼロ終了は Ok で返す
    async fn run(&self, spec: &CommandSpec) -> std::io::Result<CommandOutput>;
}

/// 実プロセスを起動するランナー
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, spec: &CommandSpec) -> std::io::Result<CommandOutput> {
        tracing::debug!("Running: {}", spec.command_line());

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .stdin(if spec.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(if spec.capture_stdout {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn()?;

        if let Some(input) = &spec.stdin
            && let Some(mut stdin) = child.stdin.take()
        {
            // 子プロセスが stdin を読まずに終了した場合でも終了コードと stderr を優先する
            match stdin.write_all(input).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                    tracing::debug!("{} closed stdin early", spec.program);
                }
                Err(e) => return Err(e),
            }
            // EOF を送るために閉じる
            drop(stdin);
        }

        let output = child.wait_with_output().await?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        let spec = CommandSpec::new("docker")
            .arg("build")
            .args(["-t", "myapp:latest", "."]);
        assert_eq!(spec.command_line(), "docker build -t myapp:latest .");
    }

    #[test]
    fn test_debug_redacts_stdin() {
        let spec = CommandSpec::new("docker").stdin("hunter2");
        let debug = format!("{:?}", spec);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_describe_failure() {
        let output = CommandOutput {
            code: Some(1),
            stdout: Vec::new(),
            stderr: "no such image\n".to_string(),
        };
        assert!(!output.success());
        assert_eq!(output.describe_failure(), "exit status 1: no such image");
        assert_eq!(CommandOutput::default().describe_failure(), "terminated by signal");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_pipes_stdin() {
        let spec = CommandSpec::new("cat").stdin("secret").capture_stdout();
        let output = SystemRunner.run(&spec).await.unwrap();
        assert!(output.success());
        assert_eq!(output.stdout_text(), "secret");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_keeps_status_when_stdin_unread() {
        // パイプバッファを超える入力で、読まれないまま子プロセスが終了する
        let input = "x".repeat(1024 * 1024);
        let spec = CommandSpec::new("sh")
            .args(["-c", "echo denied >&2; exit 3"])
            .stdin(input);

        let output = SystemRunner.run(&spec).await.unwrap();

        assert_eq!(output.code, Some(3));
        assert_eq!(output.stderr.trim(), "denied");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_exit_status() {
        let output = SystemRunner.run(&CommandSpec::new("false")).await.unwrap();
        assert_eq!(output.code, Some(1));
    }

    #[tokio::test]
    async fn test_system_runner_missing_program() {
        let result = SystemRunner
            .run(&CommandSpec::new("stackhook-no-such-binary"))
            .await;
        assert!(result.is_err());
    }
}
