use gw_config::GradewatchConfig;

use crate::cli::root_commands::ServeArgs;

/// Handle `gradewatch serve`.
pub async fn handle(args: &ServeArgs, mut config: GradewatchConfig) -> anyhow::Result<()> {
    if let Some(bind) = &args.bind {
        config.server.bind.clone_from(bind);
    }
    gw_server::serve(&config).await?;
    Ok(())
}
