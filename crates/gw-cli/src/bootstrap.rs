use anyhow::Context;
use gw_config::GradewatchConfig;
use gw_db::SchoolDb;

use crate::cli::GlobalFlags;

/// Load configuration (with `.env`) and apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<GradewatchConfig> {
    let mut config =
        GradewatchConfig::load_with_dotenv().context("failed to load gradewatch configuration")?;
    if let Some(path) = &flags.database {
        config.database.path.clone_from(path);
    }
    Ok(config)
}

pub async fn open_db(config: &GradewatchConfig) -> anyhow::Result<SchoolDb> {
    SchoolDb::open_local(&config.database.path)
        .await
        .with_context(|| format!("failed to open database at {}", config.database.path))
}
