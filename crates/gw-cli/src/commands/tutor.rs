use anyhow::bail;
use gw_config::GradewatchConfig;
use gw_core::entities::NewTutor;
use serde_json::json;

use crate::bootstrap::open_db;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::TutorCommands;
use crate::output::output;

pub async fn handle(
    action: TutorCommands,
    config: &GradewatchConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let db = open_db(config).await?;
    match action {
        TutorCommands::Create {
            first_name,
            paternal_surname,
            maternal_surname,
            phone,
            email,
        } => {
            let input = NewTutor {
                first_name,
                paternal_surname,
                maternal_surname,
                phone,
                email,
            };
            input.validate()?;
            output(&db.create_tutor(&input).await?, flags)
        }
        TutorCommands::Link {
            tutor_id,
            student_id,
            relation,
        } => output(&db.link_tutor(tutor_id, student_id, &relation).await?, flags),
        TutorCommands::Unlink {
            tutor_id,
            student_id,
        } => {
            if !db.unlink_tutor(tutor_id, student_id).await? {
                bail!("tutor {tutor_id} is not linked to student {student_id}");
            }
            output(
                &json!({ "tutor_id": tutor_id, "student_id": student_id, "unlinked": true }),
                flags,
            )
        }
        TutorCommands::Students { tutor_id } => {
            output(&db.linked_students(tutor_id).await?, flags)
        }
    }
}
