//! Shared fixture for router tests: an in-memory store seeded with one
//! struggling student, a classmate, a linked tutor and an unlinked tutor.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use gw_auth::TokenSigner;
use gw_auth::password::{decoy_hash, hash_password};
use gw_core::access::Caller;
use gw_core::entities::{NewGrade, NewPeriod, NewStudent, NewSubject, NewTutor};
use gw_core::risk::RiskThresholds;
use gw_db::SchoolDb;
use gw_server::bot::BotClient;
use gw_server::{AppState, SharedState, router};
use serde_json::Value;
use tower::ServiceExt;

pub const PASSWORD: &str = "secreto1";
pub const ANA_NID: &str = "GOMA050312MDFRRN09";
pub const LUIS_NID: &str = "PERL050101HDFRRS01";

pub struct Fixture {
    pub app: Router,
    pub state: SharedState,
    pub ana: i64,
    pub luis: i64,
    pub tutor: i64,
    pub stranger: i64,
    pub period: i64,
}

fn student(national_id: &str, first_name: &str) -> NewStudent {
    NewStudent {
        national_id: national_id.into(),
        first_name: first_name.into(),
        paternal_surname: "Gomez".into(),
        maternal_surname: None,
        grade_level: 2,
        group: "A".into(),
        password: PASSWORD.into(),
    }
}

fn tutor(first_name: &str, email: &str) -> NewTutor {
    NewTutor {
        first_name: first_name.into(),
        paternal_surname: "Lopez".into(),
        maternal_surname: None,
        phone: Some("5215512345678".into()),
        email: Some(email.into()),
    }
}

/// Build the app against `bot_url`. Ana has [5.0, 4.5, 5.5] in period 1.
pub async fn fixture_with_bot(bot_url: &str) -> Fixture {
    let db = SchoolDb::open_local(":memory:").await.unwrap();
    let hash = hash_password(PASSWORD, 4).unwrap();

    let ana = db.create_student(&student(ANA_NID, "Ana"), &hash).await.unwrap().id;
    let luis = db.create_student(&student(LUIS_NID, "Luis"), &hash).await.unwrap().id;
    let tutor_id = db.create_tutor(&tutor("Maria", "maria@example.com")).await.unwrap().id;
    let stranger = db.create_tutor(&tutor("Pedro", "pedro@example.com")).await.unwrap().id;
    db.link_tutor(tutor_id, ana, "mother").await.unwrap();

    let period = db
        .create_period(&NewPeriod {
            number: 1,
            name: "First term".into(),
        })
        .await
        .unwrap()
        .id;
    for (i, value) in [5.0, 4.5, 5.5].into_iter().enumerate() {
        let subject = db
            .create_subject(&NewSubject {
                name: format!("Subject {i}"),
                code: format!("SUB{i}"),
            })
            .await
            .unwrap();
        db.record_grade(&NewGrade {
            student_id: ana,
            subject_id: subject.id,
            period_id: period,
            value,
        })
        .await
        .unwrap();
    }

    let state = Arc::new(AppState {
        db,
        thresholds: RiskThresholds::default(),
        signer: TokenSigner::new("router-test-secret", 1).unwrap(),
        bot: BotClient::new(bot_url, Duration::from_millis(500)).unwrap(),
        bcrypt_cost: 4,
        decoy_hash: decoy_hash(4).unwrap(),
        allowed_origins: vec![],
    });
    Fixture {
        app: router(Arc::clone(&state)),
        state,
        ana,
        luis,
        tutor: tutor_id,
        stranger,
        period,
    }
}

/// Nothing listens on the discard port, so relay calls fail fast.
pub async fn fixture() -> Fixture {
    fixture_with_bot("http://127.0.0.1:9").await
}

impl Fixture {
    pub fn token(&self, caller: Caller) -> String {
        self.state.signer.issue(caller, None).unwrap().token
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send("GET", uri, token, None).await
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }
}
