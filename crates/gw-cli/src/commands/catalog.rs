use gw_config::GradewatchConfig;
use gw_core::entities::{NewPeriod, NewSubject};

use crate::bootstrap::open_db;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::{PeriodCommands, SubjectCommands};
use crate::output::output;

pub async fn handle_subject(
    action: SubjectCommands,
    config: &GradewatchConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let db = open_db(config).await?;
    match action {
        SubjectCommands::Create { name, code } => {
            let input = NewSubject { name, code };
            input.validate()?;
            output(&db.create_subject(&input).await?, flags)
        }
        SubjectCommands::List => output(&db.list_subjects().await?, flags),
    }
}

pub async fn handle_period(
    action: PeriodCommands,
    config: &GradewatchConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let db = open_db(config).await?;
    match action {
        PeriodCommands::Create { number, name } => {
            let input = NewPeriod { number, name };
            input.validate()?;
            output(&db.create_period(&input).await?, flags)
        }
        PeriodCommands::List => output(&db.list_periods().await?, flags),
    }
}
