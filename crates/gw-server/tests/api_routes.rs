mod support;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use gw_core::access::Caller;
use pretty_assertions::assert_eq;
use serde_json::json;
use support::{ANA_NID, PASSWORD, fixture};
use tower::ServiceExt;

#[tokio::test]
async fn health_is_public_and_tagged_with_request_id() {
    let f = fixture().await;
    let response = f
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("x-request-id", "req-test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "req-test");
}

#[tokio::test]
async fn index_lists_endpoints() {
    let f = fixture().await;
    let (status, body) = f.get("/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.to_string().contains("/api/students/:id/summary"));
}

// ---------------------------------------------------------------------------
// auth
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_then_verify() {
    let f = fixture().await;
    let (status, body) = f
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "national_id": ANA_NID, "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["student"]["id"], f.ana);
    assert!(body["data"]["student"].get("password_hash").is_none());

    let token = body["data"]["token"].as_str().unwrap().to_string();
    let (status, body) = f.get("/api/auth/verify", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["valid"], true);
    assert_eq!(body["data"]["caller"], json!({ "role": "student", "id": f.ana }));
    assert_eq!(body["data"]["student"]["first_name"], "Ana");
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let f = fixture().await;
    let (status, body) = f
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "national_id": ANA_NID, "password": "wrong-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn login_with_unknown_national_id_is_unauthorized() {
    let f = fixture().await;
    let (status, _) = f
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "national_id": "ZZZZ000000HDFRRN09", "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_id_and_wrong_password_answer_identically() {
    let f = fixture().await;
    let (unknown_status, unknown) = f
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "national_id": "ZZZZ000000HDFRRN09", "password": "wrong-password" })),
        )
        .await;
    let (wrong_status, wrong) = f
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "national_id": ANA_NID, "password": "wrong-password" })),
        )
        .await;
    assert_eq!(unknown_status, wrong_status);
    assert_eq!(unknown, wrong);
    assert!(f.state.decoy_hash.starts_with("$2b$04$"));
}

#[tokio::test]
async fn login_with_missing_fields_lists_each_error() {
    let f = fixture().await;
    let (status, body) = f
        .send("POST", "/api/auth/login", None, Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(body["errors"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let f = fixture().await;
    let response = f
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let f = fixture().await;
    let (status, _) = f.get("/api/auth/verify", Some("not-a-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// student data and the access policy
// ---------------------------------------------------------------------------

#[tokio::test]
async fn student_reads_own_summary() {
    let f = fixture().await;
    let token = f.token(Caller::Student { id: f.ana });
    let (status, body) = f
        .get(&format!("/api/students/{}/summary", f.ana), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["average"], 5.0);
    assert_eq!(data["failed_count"], 3);
    assert_eq!(data["risk"]["is_at_risk"], true);
    assert_eq!(data["grades"].as_array().unwrap().len(), 3);
    assert_eq!(data["tutors"][0]["relation"], "mother");
}

#[tokio::test]
async fn summary_requires_a_token() {
    let f = fixture().await;
    let (status, body) = f
        .get(&format!("/api/students/{}/summary", f.ana), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn student_cannot_read_classmate() {
    let f = fixture().await;
    let token = f.token(Caller::Student { id: f.luis });
    let (status, _) = f
        .get(&format!("/api/students/{}/grades", f.ana), Some(&token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn linked_tutor_reads_risk_unlinked_does_not() {
    let f = fixture().await;
    let linked = f.token(Caller::Tutor { id: f.tutor });
    let (status, body) = f
        .get(&format!("/api/students/{}/risk", f.ana), Some(&linked))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["criteria"]["minimum_average"], 6.0);
    assert_eq!(body["data"]["risk"]["reasons"].as_array().unwrap().len(), 2);

    let stranger = f.token(Caller::Tutor { id: f.stranger });
    let (status, _) = f
        .get(&format!("/api/students/{}/risk", f.ana), Some(&stranger))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_is_denied_student_data() {
    let f = fixture().await;
    let token = f.token(Caller::Admin { id: 1 });
    let (status, _) = f
        .get(&format!("/api/students/{}/summary", f.ana), Some(&token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_student_is_not_found() {
    let f = fixture().await;
    let token = f.token(Caller::Student { id: 999 });
    let (status, body) = f.get("/api/students/999/summary", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "student 999 not found");
}

#[tokio::test]
async fn bad_period_is_rejected_before_access_check() {
    let f = fixture().await;
    let token = f.token(Caller::Student { id: f.luis });
    for period in ["abc", "0", "-1"] {
        let (status, body) = f
            .get(
                &format!("/api/students/{}/summary?period={period}", f.ana),
                Some(&token),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "period={period}");
        assert_eq!(body["errors"][0]["field"], "period");
    }
}

#[tokio::test]
async fn period_scope_narrows_grades() {
    let f = fixture().await;
    let token = f.token(Caller::Student { id: f.ana });
    let (_, body) = f
        .get(
            &format!("/api/students/{}/grades?period={}", f.ana, f.period + 1),
            Some(&token),
        )
        .await;
    assert_eq!(body["data"]["grades"], json!([]));
    assert_eq!(body["data"]["average"], json!(null));
    assert_eq!(body["data"]["failed_count"], 0);
}

#[tokio::test]
async fn missing_token_is_checked_before_id_and_period() {
    let f = fixture().await;
    let (status, _) = f.get("/api/students/abc/summary", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = f
        .get(&format!("/api/students/{}/summary?period=abc", f.ana), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() {
    let f = fixture().await;
    let token = f.token(Caller::Student { id: f.ana });
    let (status, _) = f.get("/api/students/abc/summary", Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn profile_is_for_students_only() {
    let f = fixture().await;
    let token = f.token(Caller::Student { id: f.ana });
    let (status, body) = f.get("/api/students/profile", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["student"]["national_id"], ANA_NID);

    let tutor = f.token(Caller::Tutor { id: f.tutor });
    let (status, _) = f.get("/api/students/profile", Some(&tutor)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_creates_students_and_duplicates_conflict() {
    let f = fixture().await;
    let admin = f.token(Caller::Admin { id: 1 });
    let input = json!({
        "national_id": "ROJC060707HDFRRR05",
        "first_name": "Carlos",
        "paternal_surname": "Rojas",
        "grade_level": 1,
        "group": "B",
        "password": "carlos123",
    });

    let (status, body) = f
        .send("POST", "/api/students", Some(&admin), Some(input.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["student"]["group"], "B");

    let (status, _) = f
        .send("POST", "/api/students", Some(&admin), Some(input))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = f.get("/api/students", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 3);
}

#[tokio::test]
async fn invalid_student_reports_fields() {
    let f = fixture().await;
    let admin = f.token(Caller::Admin { id: 1 });
    let (status, body) = f
        .send(
            "POST",
            "/api/students",
            Some(&admin),
            Some(json!({
                "national_id": "short",
                "first_name": "C",
                "paternal_surname": "Rojas",
                "grade_level": 4,
                "group": "b",
                "password": "123",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(
        fields,
        vec!["national_id", "first_name", "grade_level", "group", "password"]
    );
}

#[tokio::test]
async fn student_cannot_list_or_create() {
    let f = fixture().await;
    let token = f.token(Caller::Student { id: f.ana });
    let (status, _) = f.get("/api/students", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// tutors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn tutor_sees_linked_students_and_at_risk_list() {
    let f = fixture().await;
    let token = f.token(Caller::Tutor { id: f.tutor });

    let (status, body) = f
        .get(&format!("/api/tutors/{}/students", f.tutor), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["students"][0]["id"], f.ana);

    let (status, body) = f
        .get(&format!("/api/tutors/{}/at-risk", f.tutor), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["students"][0]["failed_count"], 3);
}

#[tokio::test]
async fn tutor_cannot_read_another_tutors_list() {
    let f = fixture().await;
    let token = f.token(Caller::Tutor { id: f.stranger });
    let (status, _) = f
        .get(&format!("/api/tutors/{}/at-risk", f.tutor), Some(&token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// appointments
// ---------------------------------------------------------------------------

fn booking() -> serde_json::Value {
    json!({
        "name": "Laura Diaz",
        "phone": "5215598765432",
        "date": "2026-11-03",
        "time": "10:30",
        "service": "Tutoring session",
    })
}

#[tokio::test]
async fn appointment_lifecycle() {
    let f = fixture().await;
    let (status, body) = f
        .send("POST", "/api/appointments", None, Some(booking()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "pending");
    let id = body["data"]["id"].as_i64().unwrap();

    let uri = format!("/api/appointments/{id}");
    let (status, body) = f
        .send("PUT", &uri, None, Some(json!({ "status": "confirmed" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "confirmed");

    let (status, _) = f
        .send("PUT", &uri, None, Some(json!({ "status": "pending" })))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = f
        .send("PUT", &uri, None, Some(json!({ "status": "done" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = f.get("/api/appointments/stats", None).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["confirmed"], 1);

    let (_, body) = f.get("/api/appointments/phone/5215598765432", None).await;
    assert_eq!(body["data"]["total"], 1);

    let (status, _) = f.send("DELETE", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = f.get(&uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn appointment_list_filters_by_status() {
    let f = fixture().await;
    f.send("POST", "/api/appointments", None, Some(booking()))
        .await;

    let (_, body) = f.get("/api/appointments?status=pending", None).await;
    assert_eq!(body["data"]["total"], 1);
    let (_, body) = f.get("/api/appointments?status=cancelled", None).await;
    assert_eq!(body["data"]["total"], 0);
    let (status, _) = f.get("/api/appointments?status=later", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unpadded_bookings_are_stored_padded_and_listed_in_order() {
    let f = fixture().await;
    let mut late = booking();
    late["time"] = json!("10:30");
    let mut early = booking();
    early["time"] = json!("9:05");
    let mut next_month = booking();
    next_month["date"] = json!("2026-12-1");
    next_month["time"] = json!("8:00");

    for input in [late, early, next_month] {
        let (status, _) = f
            .send("POST", "/api/appointments", None, Some(input))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = f.get("/api/appointments", None).await;
    let slots: Vec<(String, String)> = body["data"]["appointments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| {
            (
                a["date"].as_str().unwrap().to_string(),
                a["time"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        slots,
        vec![
            ("2026-11-03".to_string(), "09:05".to_string()),
            ("2026-11-03".to_string(), "10:30".to_string()),
            ("2026-12-01".to_string(), "08:00".to_string()),
        ]
    );

    let (_, body) = f.get("/api/appointments/phone/5215598765432", None).await;
    assert_eq!(body["data"]["appointments"][0]["date"], "2026-12-01");
}

#[tokio::test]
async fn invalid_booking_is_rejected() {
    let f = fixture().await;
    let mut input = booking();
    input["phone"] = json!("12");
    input["date"] = json!("03/11/2026");
    let (status, body) = f
        .send("POST", "/api/appointments", None, Some(input))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn reminder_with_bot_down_is_bad_gateway() {
    let f = fixture().await;
    let (_, body) = f
        .send("POST", "/api/appointments", None, Some(booking()))
        .await;
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = f
        .send("POST", &format!("/api/appointments/{id}/reminder"), None, None)
        .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["message"], "Chatbot relay failed");
}

#[tokio::test]
async fn bot_status_reports_offline_without_failing() {
    let f = fixture().await;
    let (status, body) = f.get("/api/whatsapp/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["online"], false);
    assert_eq!(body["data"]["bot_status"], "offline");
}
