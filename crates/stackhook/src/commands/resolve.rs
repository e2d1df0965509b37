use super::Context;
use stackhook_cloud_aws::AwsContext;
use stackhook_vars::ExtendedVars;

/// 参照ごとに解決し、`{ 参照: 値 }` の JSON で出力
pub async fn handle(ctx: &Context, references: &[String]) -> anyhow::Result<()> {
    let project = ctx.try_load_project();
    let region = ctx.region(project.as_ref());

    let aws = AwsContext::load(Some(&region)).await;
    let vars = ExtendedVars::new(aws.network());

    let mut resolved = serde_json::Map::new();
    for reference in references {
        let value = vars.resolve(reference).await?;
        resolved.insert(
            reference.clone(),
            value.map(|v| v.to_json()).unwrap_or(serde_json::Value::Null),
        );
    }

    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}
