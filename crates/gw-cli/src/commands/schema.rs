use anyhow::bail;
use gw_core::entities::{Appointment, NewAppointment, NewStudent, Student};
use gw_core::responses::{ApiFailure, AtRiskListResponse};
use gw_core::summary::{AcademicSummary, GradeReport, RiskReport};
use schemars::schema_for;

use crate::cli::root_commands::SchemaArgs;

/// Handle `gradewatch schema`. Always prints JSON.
pub fn handle(args: &SchemaArgs) -> anyhow::Result<()> {
    let schema = match args.type_name.as_str() {
        "summary" => schema_for!(AcademicSummary),
        "risk-report" => schema_for!(RiskReport),
        "grade-report" => schema_for!(GradeReport),
        "at-risk" => schema_for!(AtRiskListResponse),
        "student" => schema_for!(Student),
        "new-student" => schema_for!(NewStudent),
        "appointment" => schema_for!(Appointment),
        "new-appointment" => schema_for!(NewAppointment),
        "failure" => schema_for!(ApiFailure),
        other => bail!("unknown schema type '{other}'"),
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
