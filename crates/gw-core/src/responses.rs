//! JSON envelopes returned by the HTTP API.
//!
//! Successful responses are `{ "success": true, "data": ... }`; failures are
//! `{ "success": false, "message": ..., "errors": [...] }` with `errors`
//! present only for validation failures.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::access::Caller;
use crate::entities::{LinkedStudent, LinkedTutor, Student};
use crate::risk::RiskThresholds;
use crate::summary::AtRiskStudent;
use crate::validation::FieldError;

/// Success envelope.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ApiSuccess<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> ApiSuccess<T> {
    pub const fn new(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Failure envelope.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ApiFailure {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ApiFailure {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = errors;
        self
    }
}

/// Response from `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LoginResponse {
    pub token: String,
    pub student: Student,
}

/// Response wrapping a single student.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StudentResponse {
    pub student: Student,
}

/// Response from `GET /api/students`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StudentListResponse {
    pub total: usize,
    pub students: Vec<Student>,
}

/// Response from `GET /api/students/:id/tutors`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TutorListResponse {
    pub tutors: Vec<LinkedTutor>,
}

/// Response from `GET /api/tutors/:id/students`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LinkedStudentListResponse {
    pub students: Vec<LinkedStudent>,
}

/// Response from `GET /api/tutors/:id/at-risk`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AtRiskListResponse {
    pub total: usize,
    pub criteria: RiskThresholds,
    pub students: Vec<AtRiskStudent>,
}

/// Response from `GET /api/auth/verify`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SessionInfo {
    pub valid: bool,
    pub caller: Caller,
    /// Seconds since the epoch.
    pub expires_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<Student>,
}

/// Response from `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
