use axum::Json;
use axum::extract::State;
use gw_auth::AuthError;
use gw_auth::password::verify_password;
use gw_core::access::Caller;
use gw_core::entities::MIN_PASSWORD_LEN;
use gw_core::responses::{ApiSuccess, LoginResponse, SessionInfo};
use gw_core::validation::Validator;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::extract::{ApiJson, Authenticated};
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub national_id: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    fn validate(&self) -> Result<(), ApiError> {
        Validator::new()
            .check(
                !self.national_id.trim().is_empty(),
                "national_id",
                "national_id is required",
            )
            .check(
                self.password.chars().count() >= MIN_PASSWORD_LEN,
                "password",
                "password must be at least 6 characters",
            )
            .finish()
            .map_err(ApiError::from)
    }
}

pub async fn login(
    State(state): State<SharedState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<ApiSuccess<LoginResponse>>, ApiError> {
    request.validate()?;

    let credentials = state.db.find_student_credentials(&request.national_id).await?;
    let hash = credentials
        .as_ref()
        .map_or_else(|| state.decoy_hash.clone(), |(_, hash)| hash.clone());
    let password = request.password;
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await?;

    let student = match credentials {
        Some((student, _)) if matches => student,
        Some((student, _)) => {
            warn!(student_id = student.id, "login with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }
        None => {
            warn!("login for unknown national_id");
            return Err(AuthError::InvalidCredentials.into());
        }
    };

    let issued = state.signer.issue(
        Caller::Student { id: student.id },
        Some(student.national_id.clone()),
    )?;
    info!(student_id = student.id, "student logged in");
    Ok(Json(
        ApiSuccess::new(LoginResponse {
            token: issued.token,
            student,
        })
        .with_message("Login successful"),
    ))
}

pub async fn verify(
    State(state): State<SharedState>,
    auth: Authenticated,
) -> Result<Json<ApiSuccess<SessionInfo>>, ApiError> {
    let student = match auth.caller {
        Caller::Student { id } => Some(
            state
                .db
                .get_student(id)
                .await?
                .ok_or_else(|| AuthError::InvalidToken(format!("student {id} no longer exists")))?,
        ),
        Caller::Tutor { .. } | Caller::Admin { .. } => None,
    };
    Ok(Json(ApiSuccess::new(SessionInfo {
        valid: true,
        caller: auth.caller,
        expires_at: auth.claims.exp,
        student,
    })))
}

/// Tokens are stateless; logout only acknowledges so the client can drop its copy.
pub async fn logout(auth: Authenticated) -> Json<ApiSuccess<()>> {
    info!(role = %auth.caller.role(), id = auth.caller.id(), "logout");
    Json(ApiSuccess::new(()).with_message("Logged out"))
}
