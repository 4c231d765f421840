//! Request extractors that fail with the API's JSON envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use gw_auth::{AuthError, SessionClaims, bearer_token};
use gw_core::access::Caller;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::state::SharedState;

/// The authenticated caller, from an `Authorization: Bearer` header.
pub struct Authenticated {
    pub caller: Caller,
    pub claims: SessionClaims,
}

#[axum::async_trait]
impl FromRequestParts<SharedState> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or(AuthError::NotAuthenticated)?;
        let (caller, claims) = state.signer.authenticate(token)?;
        Ok(Self { caller, claims })
    }
}

/// A positive numeric `:id` path segment.
pub struct IdParam(pub i64);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for IdParam {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        match raw.parse::<i64>() {
            Ok(id) if id >= 1 => Ok(Self(id)),
            _ => Err(ApiError::BadRequest(format!(
                "id must be a positive integer, got '{raw}'"
            ))),
        }
    }
}

/// JSON body whose parse failures render as a 400 envelope.
pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::BadRequest(describe(&rejection))),
        }
    }
}

fn describe(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Expected a JSON body with content-type application/json".to_string()
        }
        other => other.body_text(),
    }
}
