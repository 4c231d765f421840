use axum::Json;
use chrono::Utc;
use gw_core::responses::HealthResponse;
use serde_json::{Value, json};

pub async fn index() -> Json<Value> {
    Json(json!({
        "name": "gradewatch",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "GET /api/health",
            "auth": ["POST /api/auth/login", "GET /api/auth/verify", "POST /api/auth/logout"],
            "students": [
                "GET /api/students/profile",
                "GET /api/students",
                "POST /api/students",
                "GET /api/students/:id/grades?period=",
                "GET /api/students/:id/summary?period=",
                "GET /api/students/:id/tutors",
                "GET /api/students/:id/risk?period="
            ],
            "tutors": ["GET /api/tutors/:id/students", "GET /api/tutors/:id/at-risk"],
            "appointments": [
                "POST /api/appointments",
                "GET /api/appointments?status=",
                "GET /api/appointments/stats",
                "GET /api/appointments/phone/:phone",
                "GET|PUT|DELETE /api/appointments/:id",
                "POST /api/appointments/:id/reminder"
            ],
            "whatsapp": [
                "POST /api/whatsapp/send",
                "POST /api/whatsapp/check-number",
                "GET /api/whatsapp/status",
                "POST /api/whatsapp/notify-status-change"
            ]
        }
    }))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
