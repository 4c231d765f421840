use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use gw_auth::password::hash_password;
use gw_core::access::{Caller, can_access};
use gw_core::entities::NewStudent;
use gw_core::errors::CoreError;
use gw_core::records::PeriodScope;
use gw_core::responses::{ApiSuccess, StudentListResponse, StudentResponse, TutorListResponse};
use gw_core::summary::{
    AcademicSummary, GradeReport, RiskReport, build_grade_report, build_risk_report, build_summary,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::extract::{ApiJson, Authenticated, IdParam};
use crate::state::SharedState;

#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    pub period: Option<String>,
}

impl PeriodQuery {
    fn scope(&self) -> Result<PeriodScope, ApiError> {
        Ok(PeriodScope::parse(self.period.as_deref())?)
    }
}

/// Reject unless `caller` may read `student_id`'s data.
async fn authorize(state: &SharedState, caller: Caller, student_id: i64) -> Result<(), ApiError> {
    if can_access(&state.db, caller, student_id).await? {
        Ok(())
    } else {
        warn!(
            role = %caller.role(),
            caller_id = caller.id(),
            student_id,
            "student data access denied"
        );
        Err(ApiError::Forbidden)
    }
}

fn require_admin(caller: Caller) -> Result<(), ApiError> {
    match caller {
        Caller::Admin { .. } => Ok(()),
        Caller::Student { .. } | Caller::Tutor { .. } => Err(ApiError::Forbidden),
    }
}

pub async fn profile(
    State(state): State<SharedState>,
    auth: Authenticated,
) -> Result<Json<ApiSuccess<StudentResponse>>, ApiError> {
    let Caller::Student { id } = auth.caller else {
        return Err(ApiError::Forbidden);
    };
    let student = state
        .db
        .get_student(id)
        .await?
        .ok_or_else(|| CoreError::not_found("student", id))?;
    Ok(Json(ApiSuccess::new(StudentResponse { student })))
}

pub async fn list(
    State(state): State<SharedState>,
    auth: Authenticated,
) -> Result<Json<ApiSuccess<StudentListResponse>>, ApiError> {
    require_admin(auth.caller)?;
    let students = state.db.list_students().await?;
    Ok(Json(ApiSuccess::new(StudentListResponse {
        total: students.len(),
        students,
    })))
}

pub async fn create(
    State(state): State<SharedState>,
    auth: Authenticated,
    ApiJson(input): ApiJson<NewStudent>,
) -> Result<(StatusCode, Json<ApiSuccess<StudentResponse>>), ApiError> {
    require_admin(auth.caller)?;
    input.validate()?;

    let password = input.password.clone();
    let cost = state.bcrypt_cost;
    let hash = tokio::task::spawn_blocking(move || hash_password(&password, cost)).await??;
    let student = state.db.create_student(&input, &hash).await?;
    info!(student_id = student.id, admin_id = auth.caller.id(), "student created");

    Ok((
        StatusCode::CREATED,
        Json(ApiSuccess::new(StudentResponse { student }).with_message("Student created")),
    ))
}

pub async fn grades(
    State(state): State<SharedState>,
    auth: Authenticated,
    IdParam(student_id): IdParam,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<ApiSuccess<GradeReport>>, ApiError> {
    let scope = query.scope()?;
    authorize(&state, auth.caller, student_id).await?;
    let report = build_grade_report(&state.db, student_id, scope).await?;
    Ok(Json(ApiSuccess::new(report)))
}

pub async fn summary(
    State(state): State<SharedState>,
    auth: Authenticated,
    IdParam(student_id): IdParam,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<ApiSuccess<AcademicSummary>>, ApiError> {
    let scope = query.scope()?;
    authorize(&state, auth.caller, student_id).await?;
    let summary = build_summary(&state.db, &state.thresholds, student_id, scope).await?;
    Ok(Json(ApiSuccess::new(summary)))
}

pub async fn tutors(
    State(state): State<SharedState>,
    auth: Authenticated,
    IdParam(student_id): IdParam,
) -> Result<Json<ApiSuccess<TutorListResponse>>, ApiError> {
    authorize(&state, auth.caller, student_id).await?;
    if state.db.get_student(student_id).await?.is_none() {
        return Err(CoreError::not_found("student", student_id).into());
    }
    let tutors = state.db.linked_tutors(student_id).await?;
    Ok(Json(ApiSuccess::new(TutorListResponse { tutors })))
}

pub async fn risk(
    State(state): State<SharedState>,
    auth: Authenticated,
    IdParam(student_id): IdParam,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<ApiSuccess<RiskReport>>, ApiError> {
    let scope = query.scope()?;
    authorize(&state, auth.caller, student_id).await?;
    let report = build_risk_report(&state.db, &state.thresholds, student_id, scope).await?;
    Ok(Json(ApiSuccess::new(report)))
}
