//! Client for the WhatsApp chatbot process.
//!
//! The bot exposes a small HTTP API (`/v1/messages`, `/v1/check-number`,
//! `/v1/status`). Appointment reminders and status notices are composed here
//! and delivered through it.

use std::time::Duration;

use gw_core::entities::Appointment;
use gw_core::enums::AppointmentStatus;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum BotError {
    #[error("chatbot request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("chatbot answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid chatbot URL '{0}'")]
    InvalidUrl(String),
}

/// Reachability of the chatbot, as reported to API clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BotStatus {
    pub online: bool,
    pub bot_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl BotStatus {
    fn offline() -> Self {
        Self {
            online: false,
            bot_status: "offline".into(),
            timestamp: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BotClient {
    http: reqwest::Client,
    base_url: String,
}

impl BotClient {
    /// # Errors
    ///
    /// Returns `BotError::InvalidUrl` for a URL without an http(s) scheme, or
    /// `BotError::Request` if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BotError> {
        let base_url = base_url.trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(BotError::InvalidUrl(base_url.to_string()));
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, BotError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "chatbot request");
        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BotError::Status {
                status: status.as_u16(),
                body,
            });
        }
        // Some bot endpoints answer with an empty body.
        let text = response.text().await?;
        Ok(serde_json::from_str(&text).unwrap_or(Value::Null))
    }

    /// Send a text message to `phone`.
    ///
    /// # Errors
    ///
    /// Returns `BotError` when the bot is unreachable or rejects the message.
    pub async fn send_message(&self, phone: &str, message: &str) -> Result<Value, BotError> {
        self.post("/v1/messages", &json!({ "number": phone, "message": message }))
            .await
    }

    /// Ask the bot whether `phone` has a WhatsApp account.
    ///
    /// # Errors
    ///
    /// Returns `BotError` when the bot is unreachable or rejects the request.
    pub async fn check_number(&self, phone: &str) -> Result<Value, BotError> {
        self.post("/v1/check-number", &json!({ "number": phone }))
            .await
    }

    /// Current bot status. An unreachable bot is reported offline.
    pub async fn status(&self) -> BotStatus {
        let url = format!("{}/v1/status", self.base_url);
        let response = match self.http.get(&url).send().await {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                warn!(status = r.status().as_u16(), "chatbot status check failed");
                return BotStatus::offline();
            }
            Err(e) => {
                warn!(error = %e, "chatbot unreachable");
                return BotStatus::offline();
            }
        };
        match response.json::<Value>().await {
            Ok(body) => BotStatus {
                online: true,
                bot_status: body["status"].as_str().unwrap_or("online").to_string(),
                timestamp: body["timestamp"].as_str().map(String::from),
            },
            Err(e) => {
                warn!(error = %e, "chatbot status body unreadable");
                BotStatus::offline()
            }
        }
    }
}

/// Reminder text for an upcoming appointment.
#[must_use]
pub fn reminder_message(appointment: &Appointment) -> String {
    [
        "🔔 *Appointment reminder*".to_string(),
        String::new(),
        format!("Hello {},", appointment.name),
        String::new(),
        "This is a reminder of your appointment:".to_string(),
        format!("📅 Date: {}", appointment.date),
        format!("🕐 Time: {}", appointment.time),
        format!("💼 Service: {}", appointment.service),
        String::new(),
        "See you there!".to_string(),
    ]
    .join("\n")
}

/// Notice sent when an appointment changes status.
#[must_use]
pub fn status_change_message(appointment: &Appointment, status: AppointmentStatus) -> String {
    let (icon, label) = match status {
        AppointmentStatus::Confirmed => ("✅", "confirmed"),
        AppointmentStatus::Cancelled => ("❌", "cancelled"),
        AppointmentStatus::Completed => ("✔️", "completed"),
        AppointmentStatus::Pending => ("📋", "pending"),
    };
    [
        format!("{icon} *Appointment update*"),
        String::new(),
        format!("Hello {},", appointment.name),
        String::new(),
        format!(
            "Your appointment on {} at {} is now *{label}*.",
            appointment.date, appointment.time
        ),
        String::new(),
        "Need help? Just write to us.".to_string(),
    ]
    .join("\n")
}
