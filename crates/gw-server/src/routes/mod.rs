//! Route table.

mod appointments;
mod auth;
mod meta;
mod students;
mod tutors;
mod whatsapp;

use axum::Router;
use axum::routing::{get, post};

use crate::state::SharedState;

pub fn api() -> Router<SharedState> {
    Router::new()
        .route("/", get(meta::index))
        .route("/api/health", get(meta::health))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/verify", get(auth::verify))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/students/profile", get(students::profile))
        .route(
            "/api/students",
            get(students::list).post(students::create),
        )
        .route("/api/students/:id/grades", get(students::grades))
        .route("/api/students/:id/summary", get(students::summary))
        .route("/api/students/:id/tutors", get(students::tutors))
        .route("/api/students/:id/risk", get(students::risk))
        .route("/api/tutors/:id/students", get(tutors::students))
        .route("/api/tutors/:id/at-risk", get(tutors::at_risk))
        .route(
            "/api/appointments",
            get(appointments::list).post(appointments::create),
        )
        .route("/api/appointments/stats", get(appointments::stats))
        .route("/api/appointments/phone/:phone", get(appointments::by_phone))
        .route(
            "/api/appointments/:id",
            get(appointments::get_one)
                .put(appointments::update_status)
                .delete(appointments::remove),
        )
        .route("/api/appointments/:id/reminder", post(appointments::reminder))
        .route("/api/whatsapp/send", post(whatsapp::send))
        .route("/api/whatsapp/check-number", post(whatsapp::check_number))
        .route("/api/whatsapp/status", get(whatsapp::status))
        .route(
            "/api/whatsapp/notify-status-change",
            post(whatsapp::notify_status_change),
        )
}
