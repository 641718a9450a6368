//! Shared helpers for HTTP integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use curaloop::adapters::http::in_memory_router;
use curaloop::config::AppConfig;
use curaloop::domain::intake::{QuestionCatalog, Questionnaire};

/// Router over fresh in-memory stores and the embedded question bank.
pub fn app() -> Router {
    let catalog = QuestionCatalog::embedded().expect("embedded bank parses");
    in_memory_router(Questionnaire::new(catalog), &AppConfig::default())
}

/// Router over a small bank, for tests that walk an intake to completion.
pub fn app_with_bank(yaml: &str) -> Router {
    let catalog = QuestionCatalog::from_yaml_str(yaml).expect("bank parses");
    in_memory_router(Questionnaire::new(catalog), &AppConfig::default())
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
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

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body)).await
}
