//! Relay routes against a stand-in chatbot listening on a loopback port.

mod support;

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use support::fixture_with_bot;

type Inbox = Arc<Mutex<Vec<Value>>>;

async fn record(State(inbox): State<Inbox>, Json(body): Json<Value>) -> Json<Value> {
    inbox.lock().unwrap().push(body);
    Json(json!({ "queued": true }))
}

async fn check(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "number": body["number"], "exists": true }))
}

async fn status() -> Json<Value> {
    Json(json!({ "status": "connected", "timestamp": "2026-10-18T09:00:00Z" }))
}

async fn fake_bot() -> (String, Inbox) {
    let inbox: Inbox = Arc::default();
    let app = Router::new()
        .route("/v1/messages", post(record))
        .route("/v1/check-number", post(check))
        .route("/v1/status", get(status))
        .with_state(Arc::clone(&inbox));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), inbox)
}

async fn book(f: &support::Fixture) -> i64 {
    let (_, body) = f
        .send(
            "POST",
            "/api/appointments",
            None,
            Some(json!({
                "name": "Laura Diaz",
                "phone": "5215598765432",
                "date": "2026-11-03",
                "time": "10:30",
                "service": "Tutoring session",
            })),
        )
        .await;
    body["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn reminder_reaches_the_bot() {
    let (url, inbox) = fake_bot().await;
    let f = fixture_with_bot(&url).await;
    let id = book(&f).await;

    let (status, body) = f
        .send("POST", &format!("/api/appointments/{id}/reminder"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Reminder sent");

    let sent = inbox.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["number"], "5215598765432");
    let text = sent[0]["message"].as_str().unwrap();
    assert!(text.contains("2026-11-03"));
    assert!(text.contains("Tutoring session"));
}

#[tokio::test]
async fn send_relays_bot_reply() {
    let (url, inbox) = fake_bot().await;
    let f = fixture_with_bot(&url).await;

    let (status, body) = f
        .send(
            "POST",
            "/api/whatsapp/send",
            None,
            Some(json!({ "phone": "5215512345678", "message": "Hola" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({ "queued": true }));
    assert_eq!(inbox.lock().unwrap()[0]["message"], "Hola");
}

#[tokio::test]
async fn send_without_message_never_reaches_the_bot() {
    let (url, inbox) = fake_bot().await;
    let f = fixture_with_bot(&url).await;

    let (status, body) = f
        .send(
            "POST",
            "/api/whatsapp/send",
            None,
            Some(json!({ "phone": "5215512345678" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "message");
    assert!(inbox.lock().unwrap().is_empty());
}

#[tokio::test]
async fn check_number_passes_through() {
    let (url, _) = fake_bot().await;
    let f = fixture_with_bot(&url).await;
    let (status, body) = f
        .send(
            "POST",
            "/api/whatsapp/check-number",
            None,
            Some(json!({ "phone": "5215512345678" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["exists"], true);
}

#[tokio::test]
async fn status_reports_online_bot() {
    let (url, _) = fake_bot().await;
    let f = fixture_with_bot(&url).await;
    let (status, body) = f.get("/api/whatsapp/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({
            "online": true,
            "bot_status": "connected",
            "timestamp": "2026-10-18T09:00:00Z",
        })
    );
}

#[tokio::test]
async fn status_change_notice_names_new_status() {
    let (url, inbox) = fake_bot().await;
    let f = fixture_with_bot(&url).await;
    let id = book(&f).await;

    let (status, _) = f
        .send(
            "POST",
            "/api/whatsapp/notify-status-change",
            None,
            Some(json!({ "appointment_id": id, "new_status": "confirmed" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let text = inbox.lock().unwrap()[0]["message"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(text.contains("*confirmed*"));
}

#[tokio::test]
async fn status_change_for_unknown_appointment_is_not_found() {
    let (url, inbox) = fake_bot().await;
    let f = fixture_with_bot(&url).await;
    let (status, _) = f
        .send(
            "POST",
            "/api/whatsapp/notify-status-change",
            None,
            Some(json!({ "appointment_id": 404, "new_status": "cancelled" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(inbox.lock().unwrap().is_empty());
}
