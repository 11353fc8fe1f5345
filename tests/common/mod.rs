//! Shared fixtures for the HTTP tests: an in-memory database, a seeded
//! question bank and a small request helper.

// each test file is its own crate and uses a different subset
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;
use trivia_api::db::queries::{categories::create_category, questions::create_question};
use trivia_api::db::{establish_connection, run_migrations};
use trivia_api::server::app::{build_router, cors_layer, AppState};

pub const SCIENCE: i64 = 1;
pub const ART: i64 = 2;
pub const HISTORY: i64 = 3;

pub const SCIENCE_QUESTIONS: &[&str] = &[
    "What is H2O?",
    "What is the boiling point of water in Celsius?",
    "Which planet is known as the Red Planet?",
    "What gas do plants absorb?",
    "How many bones are in the adult human body?",
    "What is the chemical symbol for gold?",
];

pub const ART_QUESTIONS: &[&str] = &[
    "Who painted the Mona Lisa?",
    "What title did Van Gogh give his starry painting?",
    "Which TITLE belongs to Munch's most famous painting?",
    "Which sculptor made David?",
    "What colour do you get mixing blue and yellow?",
];

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

pub async fn empty_app() -> TestApp {
    let pool = establish_connection(":memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();
    let router = build_router(AppState::new(pool.clone()), cors_layer(None).unwrap());
    TestApp { router, pool }
}

/// Science holds ids 1..=6, Art ids 7..=11 and History is empty.
pub async fn seeded_app() -> TestApp {
    let app = empty_app().await;
    assert_eq!(create_category(&app.pool, "Science").await.unwrap(), SCIENCE);
    assert_eq!(create_category(&app.pool, "Art").await.unwrap(), ART);
    assert_eq!(create_category(&app.pool, "History").await.unwrap(), HISTORY);
    for (category, questions) in [(SCIENCE, SCIENCE_QUESTIONS), (ART, ART_QUESTIONS)] {
        for (n, question) in questions.iter().enumerate() {
            create_question(&app.pool, question, "answer", category, (n % 5) as i64 + 1)
                .await
                .unwrap();
        }
    }
    app
}

pub fn total_seeded() -> usize {
    SCIENCE_QUESTIONS.len() + ART_QUESTIONS.len()
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }
}

pub fn error_body(status: StatusCode) -> Value {
    let message = match status {
        StatusCode::BAD_REQUEST => "bad request",
        StatusCode::NOT_FOUND => "resource not found",
        StatusCode::UNPROCESSABLE_ENTITY => "unprocessable",
        _ => "internal server error",
    };
    serde_json::json!({
        "success": false,
        "error": status.as_u16(),
        "message": message,
    })
}

pub fn ids(questions: &Value) -> Vec<i64> {
    questions
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect()
}
