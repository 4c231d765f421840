use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use gw_core::entities::{Appointment, AppointmentStats, NewAppointment};
use gw_core::enums::AppointmentStatus;
use gw_core::responses::ApiSuccess;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::bot::reminder_message;
use crate::error::ApiError;
use crate::extract::{ApiJson, IdParam};
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct AppointmentList {
    pub total: usize,
    pub appointments: Vec<Appointment>,
}

impl From<Vec<Appointment>> for AppointmentList {
    fn from(appointments: Vec<Appointment>) -> Self {
        Self {
            total: appointments.len(),
            appointments,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StatusFilter {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

fn parse_status(raw: &str) -> Result<AppointmentStatus, ApiError> {
    Ok(raw.parse::<AppointmentStatus>()?)
}

pub async fn list(
    State(state): State<SharedState>,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<ApiSuccess<AppointmentList>>, ApiError> {
    let status = match filter.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(parse_status(raw)?),
    };
    let appointments = state.db.list_appointments(status).await?;
    Ok(Json(ApiSuccess::new(appointments.into())))
}

pub async fn create(
    State(state): State<SharedState>,
    ApiJson(input): ApiJson<NewAppointment>,
) -> Result<(StatusCode, Json<ApiSuccess<Appointment>>), ApiError> {
    let input = input.normalize()?;
    let appointment = state.db.create_appointment(&input).await?;
    info!(appointment_id = appointment.id, "appointment booked");
    Ok((
        StatusCode::CREATED,
        Json(ApiSuccess::new(appointment).with_message("Appointment created")),
    ))
}

pub async fn stats(
    State(state): State<SharedState>,
) -> Result<Json<ApiSuccess<AppointmentStats>>, ApiError> {
    Ok(Json(ApiSuccess::new(state.db.appointment_stats().await?)))
}

pub async fn by_phone(
    State(state): State<SharedState>,
    Path(phone): Path<String>,
) -> Result<Json<ApiSuccess<AppointmentList>>, ApiError> {
    let appointments = state.db.appointments_by_phone(phone.trim()).await?;
    Ok(Json(ApiSuccess::new(appointments.into())))
}

pub async fn get_one(
    State(state): State<SharedState>,
    IdParam(id): IdParam,
) -> Result<Json<ApiSuccess<Appointment>>, ApiError> {
    Ok(Json(ApiSuccess::new(state.db.get_appointment(id).await?)))
}

pub async fn update_status(
    State(state): State<SharedState>,
    IdParam(id): IdParam,
    ApiJson(update): ApiJson<StatusUpdate>,
) -> Result<Json<ApiSuccess<Appointment>>, ApiError> {
    let next = parse_status(&update.status)?;
    let appointment = state.db.transition_appointment(id, next).await?;
    info!(appointment_id = id, status = %next, "appointment status updated");
    Ok(Json(
        ApiSuccess::new(appointment).with_message("Appointment updated"),
    ))
}

pub async fn remove(
    State(state): State<SharedState>,
    IdParam(id): IdParam,
) -> Result<Json<ApiSuccess<()>>, ApiError> {
    state.db.delete_appointment(id).await?;
    info!(appointment_id = id, "appointment deleted");
    Ok(Json(ApiSuccess::new(()).with_message("Appointment deleted")))
}

/// Send the appointment's reminder through the chatbot.
pub async fn reminder(
    State(state): State<SharedState>,
    IdParam(id): IdParam,
) -> Result<Json<ApiSuccess<()>>, ApiError> {
    let appointment = state.db.get_appointment(id).await?;
    state
        .bot
        .send_message(&appointment.phone, &reminder_message(&appointment))
        .await?;
    info!(appointment_id = id, "reminder sent");
    Ok(Json(ApiSuccess::new(()).with_message("Reminder sent")))
}
