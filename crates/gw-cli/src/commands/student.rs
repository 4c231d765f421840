use anyhow::bail;
use gw_auth::password::hash_password;
use gw_config::GradewatchConfig;
use gw_core::entities::{MIN_PASSWORD_LEN, NewStudent};
use serde_json::json;

use crate::bootstrap::open_db;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::StudentCommands;
use crate::output::output;

pub async fn handle(
    action: StudentCommands,
    config: &GradewatchConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let db = open_db(config).await?;
    match action {
        StudentCommands::Create {
            national_id,
            first_name,
            paternal_surname,
            maternal_surname,
            grade_level,
            group,
            password,
        } => {
            let input = NewStudent {
                national_id,
                first_name,
                paternal_surname,
                maternal_surname,
                grade_level,
                group,
                password,
            };
            input.validate()?;
            let hash = hash_password(&input.password, config.auth.bcrypt_cost)?;
            let student = db.create_student(&input, &hash).await?;
            output(&student, flags)
        }
        StudentCommands::List => output(&db.list_students().await?, flags),
        StudentCommands::ResetPassword { id, password } => {
            if password.chars().count() < MIN_PASSWORD_LEN {
                bail!("password must be at least {MIN_PASSWORD_LEN} characters");
            }
            let hash = hash_password(&password, config.auth.bcrypt_cost)?;
            db.set_student_password(id, &hash).await?;
            output(&json!({ "id": id, "password_reset": true }), flags)
        }
    }
}
