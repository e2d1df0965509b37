use super::Context;
use colored::Colorize;
use stackhook_publish::LifecycleHook;

/// ビルド対象のフックならビルドを実行、それ以外は何もしない
pub async fn handle(ctx: &Context, name: &str) -> anyhow::Result<()> {
    match LifecycleHook::from_name(name) {
        Some(hook) => {
            tracing::debug!("Hook {} triggers an image build", hook);
            super::build::handle(ctx).await
        }
        None => {
            println!("{} {} はビルド対象外のフックです（スキップ）", "ℹ".blue(), name);
            Ok(())
        }
    }
}

pub fn list() {
    for hook in LifecycleHook::ALL {
        println!("{}", hook);
    }
}
