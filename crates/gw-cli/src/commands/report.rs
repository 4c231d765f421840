//! Read-only academic reports, computed with the same builders the API uses.

use gw_config::GradewatchConfig;
use gw_core::records::PeriodScope;
use gw_core::responses::AtRiskListResponse;
use gw_core::summary::{build_risk_report, build_summary, students_at_risk_for_tutor};

use crate::bootstrap::open_db;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::{AtRiskArgs, ReportArgs};
use crate::output::output;

fn scope(period: Option<i64>) -> anyhow::Result<PeriodScope> {
    Ok(PeriodScope::parse(period.map(|p| p.to_string()).as_deref())?)
}

pub async fn summary(
    args: &ReportArgs,
    config: &GradewatchConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let scope = scope(args.period)?;
    let thresholds = config.alerts.thresholds()?;
    let db = open_db(config).await?;
    output(
        &build_summary(&db, &thresholds, args.student_id, scope).await?,
        flags,
    )
}

pub async fn risk(
    args: &ReportArgs,
    config: &GradewatchConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let scope = scope(args.period)?;
    let thresholds = config.alerts.thresholds()?;
    let db = open_db(config).await?;
    output(
        &build_risk_report(&db, &thresholds, args.student_id, scope).await?,
        flags,
    )
}

pub async fn at_risk(
    args: &AtRiskArgs,
    config: &GradewatchConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let thresholds = config.alerts.thresholds()?;
    let db = open_db(config).await?;
    let students = students_at_risk_for_tutor(&db, &thresholds, args.tutor_id).await?;
    output(
        &AtRiskListResponse {
            total: students.len(),
            criteria: thresholds,
            students,
        },
        flags,
    )
}
