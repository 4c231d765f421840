use gw_config::GradewatchConfig;
use gw_core::entities::NewGrade;

use crate::bootstrap::open_db;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::GradeCommands;
use crate::output::output;

pub async fn handle(
    action: GradeCommands,
    config: &GradewatchConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let db = open_db(config).await?;
    match action {
        GradeCommands::Record {
            student,
            subject,
            period,
            value,
        } => {
            let input = NewGrade {
                student_id: student,
                subject_id: subject,
                period_id: period,
                value,
            };
            input.validate()?;
            output(&db.record_grade(&input).await?, flags)
        }
    }
}
