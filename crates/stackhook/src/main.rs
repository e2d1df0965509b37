mod commands;

use clap::{Parser, Subcommand};
use stackhook_config::PluginEnv;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stackhook")]
#[command(about = "デプロイ前の変数解決とコンテナイメージ公開", long_about = None)]
struct Cli {
    /// デバッグログを出力 (SLS_DEBUG でも有効)
    #[arg(long, global = true)]
    debug: bool,
    /// プロジェクトファイル (serverless.yml) のパス
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// AWS リージョン（provider.region より優先）
    #[arg(short, long, global = true)]
    region: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// awsext 変数を解決して JSON で表示
    Resolve {
        /// 参照 (例: awsext:defaultVpcId)
        #[arg(required = true)]
        references: Vec<String>,
    },
    /// プロジェクトファイル内の ${awsext:...} を展開して表示
    Render {
        /// 対象ファイル（省略時はプロジェクトファイル）
        file: Option<PathBuf>,
    },
    /// custom.docker を検証
    Validate,
    /// イメージをビルドして ECR にプッシュ
    Build,
    /// ライフサイクルフックを実行（ビルド対象のフックのみ処理）
    Hook {
        /// フック名 (例: before:package:createDeploymentArtifacts)
        name: String,
    },
    /// ビルドを起動するフックの一覧を表示
    Hooks,
    /// バージョン情報を表示
    Version,
}

/// `RUST_LOG` 未設定時のログレベル
fn default_log_level(debug: bool) -> &'static str {
    if debug { "debug" } else { "info" }
}

fn init_tracing(debug: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_log_level(debug)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let env = PluginEnv::from_env();

    // ログは stderr、結果は stdout
    init_tracing(cli.debug || env.debug);

    let ctx = commands::Context {
        config_path: cli.config,
        region: cli.region,
        env,
    };

    match cli.command {
        Commands::Resolve { references } => commands::resolve::handle(&ctx, &references).await,
        Commands::Render { file } => commands::render::handle(&ctx, file.as_deref()).await,
        Commands::Validate => commands::validate::handle(&ctx),
        Commands::Build => commands::build::handle(&ctx).await,
        Commands::Hook { name } => commands::hook::handle(&ctx, &name).await,
        Commands::Hooks => {
            commands::hook::list();
            Ok(())
        }
        Commands::Version => {
            println!("stackhook {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        assert_eq!(default_log_level(false), "info");
        assert_eq!(default_log_level(true), "debug");
    }
}
