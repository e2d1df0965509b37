use super::{Context, project_dir};
use colored::Colorize;
use stackhook_cloud_aws::AwsContext;
use stackhook_publish::{ImagePublisher, PublisherSettings, SystemRunner};
use std::sync::Arc;

/// イメージをビルドして ECR にプッシュ
pub async fn handle(ctx: &Context) -> anyhow::Result<()> {
    let (path, project) = ctx.load_project()?;
    let region = ctx.region(Some(&project));

    // ビルドコンテキストはプロジェクトファイルのあるディレクトリ
    std::env::set_current_dir(project_dir(&path))?;

    println!("{}", "Dockerイメージをビルド中...".green());
    println!("設定ファイル: {}", path.display().to_string().cyan());
    println!("リージョン: {}", region.cyan());

    let aws = AwsContext::load(Some(&region)).await;
    let mut publisher = ImagePublisher::new(
        project.docker_block(),
        PublisherSettings {
            region,
            cli_override: ctx.env.docker_cli.clone(),
            extra_build_args: ctx.env.docker_args.clone(),
        },
        aws.identity(),
        Arc::new(SystemRunner),
    );

    match publisher.build().await {
        Ok(image) => {
            println!("{} {} → {}", "✓".green(), image.local, image.remote.cyan());
            Ok(())
        }
        Err(e) => {
            tracing::debug!("Publish stopped at {:?}", publisher.stage());
            Err(anyhow::anyhow!(e.user_message()))
        }
    }
}
