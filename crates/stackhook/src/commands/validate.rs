use super::Context;
use colored::Colorize;
use stackhook_publish::validate_docker_config;

/// custom.docker を検証
pub fn handle(ctx: &Context) -> anyhow::Result<()> {
    let (path, project) = ctx.load_project()?;
    println!("設定ファイル: {}", path.display().to_string().cyan());

    let config = validate_docker_config(&project.docker_block())
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    println!("{} custom.docker is valid", "✓".green());
    println!("  image: {}", config.image().cyan());
    println!(
        "  cli:   {}",
        config.engine_cli(ctx.env.docker_cli.as_deref()).cyan()
    );
    let build_args = config.build_args(ctx.env.docker_args.as_deref());
    if !build_args.is_empty() {
        println!("  args:  {}", build_args.join(" "));
    }
    Ok(())
}
