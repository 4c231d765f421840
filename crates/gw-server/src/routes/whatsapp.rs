//! Relay endpoints in front of the WhatsApp chatbot process.

use axum::Json;
use axum::extract::State;
use gw_core::entities::is_phone;
use gw_core::enums::AppointmentStatus;
use gw_core::responses::ApiSuccess;
use gw_core::validation::Validator;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::bot::{BotStatus, status_change_message};
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct SendRequest {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckNumberRequest {
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusChangeNotice {
    pub appointment_id: i64,
    pub new_status: String,
}

fn phone_check(validator: &mut Validator, phone: &str) {
    validator.check(is_phone(phone), "phone", "phone must be 10 to 15 digits");
}

pub async fn send(
    State(state): State<SharedState>,
    ApiJson(request): ApiJson<SendRequest>,
) -> Result<Json<ApiSuccess<Value>>, ApiError> {
    let mut validator = Validator::new();
    phone_check(&mut validator, &request.phone);
    validator
        .length(&request.message, "message", 1, 4096)
        .finish()?;

    let relayed = state
        .bot
        .send_message(&request.phone, &request.message)
        .await?;
    Ok(Json(ApiSuccess::new(relayed).with_message("Message sent")))
}

pub async fn check_number(
    State(state): State<SharedState>,
    ApiJson(request): ApiJson<CheckNumberRequest>,
) -> Result<Json<ApiSuccess<Value>>, ApiError> {
    let mut validator = Validator::new();
    phone_check(&mut validator, &request.phone);
    validator.finish()?;
    Ok(Json(ApiSuccess::new(
        state.bot.check_number(&request.phone).await?,
    )))
}

/// Always answers 200; an unreachable bot is reported as offline.
pub async fn status(State(state): State<SharedState>) -> Json<ApiSuccess<BotStatus>> {
    Json(ApiSuccess::new(state.bot.status().await))
}

pub async fn notify_status_change(
    State(state): State<SharedState>,
    ApiJson(notice): ApiJson<StatusChangeNotice>,
) -> Result<Json<ApiSuccess<()>>, ApiError> {
    let status = notice.new_status.parse::<AppointmentStatus>()?;
    let appointment = state.db.get_appointment(notice.appointment_id).await?;
    state
        .bot
        .send_message(&appointment.phone, &status_change_message(&appointment, status))
        .await?;
    info!(
        appointment_id = appointment.id,
        status = %status,
        "status change notice sent"
    );
    Ok(Json(ApiSuccess::new(()).with_message("Notification sent")))
}
