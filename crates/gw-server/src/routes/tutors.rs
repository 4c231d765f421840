use axum::Json;
use axum::extract::State;
use gw_core::access::Caller;
use gw_core::responses::{ApiSuccess, AtRiskListResponse, LinkedStudentListResponse};
use gw_core::summary::students_at_risk_for_tutor;

use crate::error::ApiError;
use crate::extract::{Authenticated, IdParam};
use crate::state::SharedState;

/// Tutor routes are only readable by the tutor they name.
fn require_self(caller: Caller, tutor_id: i64) -> Result<(), ApiError> {
    match caller {
        Caller::Tutor { id } if id == tutor_id => Ok(()),
        _ => Err(ApiError::Forbidden),
    }
}

pub async fn students(
    State(state): State<SharedState>,
    auth: Authenticated,
    IdParam(tutor_id): IdParam,
) -> Result<Json<ApiSuccess<LinkedStudentListResponse>>, ApiError> {
    require_self(auth.caller, tutor_id)?;
    let students = state.db.linked_students(tutor_id).await?;
    Ok(Json(ApiSuccess::new(LinkedStudentListResponse { students })))
}

pub async fn at_risk(
    State(state): State<SharedState>,
    auth: Authenticated,
    IdParam(tutor_id): IdParam,
) -> Result<Json<ApiSuccess<AtRiskListResponse>>, ApiError> {
    require_self(auth.caller, tutor_id)?;
    let students = students_at_risk_for_tutor(&state.db, &state.thresholds, tutor_id).await?;
    Ok(Json(ApiSuccess::new(AtRiskListResponse {
        total: students.len(),
        criteria: state.thresholds,
        students,
    })))
}
