use gw_config::GradewatchConfig;
use serde::Serialize;
use tracing::info;

use crate::bootstrap::open_db;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct InitReport {
    database: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    token_secret: Option<String>,
    next_step: &'static str,
}

/// Handle `gradewatch init`: apply the schema and hand out a token secret.
pub async fn handle(
    args: &InitArgs,
    config: &GradewatchConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    open_db(config).await?;
    info!(database = %config.database.path, "database ready");

    let token_secret = if args.no_secret || config.auth.is_configured() {
        None
    } else {
        Some(gw_auth::generate_secret()?)
    };
    let next_step = if token_secret.is_some() {
        "export GRADEWATCH_AUTH__TOKEN_SECRET=<token_secret>, then run `gradewatch serve`"
    } else {
        "run `gradewatch serve`"
    };

    output(
        &InitReport {
            database: config.database.path.clone(),
            token_secret,
            next_step,
        },
        flags,
    )
}
