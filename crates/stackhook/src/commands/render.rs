use super::Context;
use anyhow::Context as _;
use stackhook_cloud_aws::AwsContext;
use stackhook_vars::{ExtendedVars, interpolate_value};
use std::path::Path;

/// YAML 内の ${awsext:...} を展開して stdout に出力
pub async fn handle(ctx: &Context, file: Option<&Path>) -> anyhow::Result<()> {
    let path = match file {
        Some(path) => path.to_path_buf(),
        None => ctx.project_path()?,
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("{} を読み込めませんでした", path.display()))?;
    let document: serde_json::Value = serde_yaml::from_str(&content)
        .with_context(|| format!("{} の解析に失敗しました", path.display()))?;

    let project = ctx.try_load_project();
    let region = ctx.region(project.as_ref());
    let aws = AwsContext::load(Some(&region)).await;
    let vars = ExtendedVars::new(aws.network());

    let rendered = interpolate_value(&vars, document).await?;
    print!("{}", serde_yaml::to_string(&rendered)?);
    Ok(())
}
