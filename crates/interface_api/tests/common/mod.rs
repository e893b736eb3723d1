//! Helpers shared by the HTTP test suites

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use domain_customer::InMemoryCustomerStore;
use interface_api::config::ApiConfig;
use interface_api::create_router;

/// Router over a fresh in-memory store
pub fn app() -> Router {
    create_router(Arc::new(InMemoryCustomerStore::new()), ApiConfig::default())
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn create(app: &Router, body: Value) -> Value {
    let (status, created) = send(app, Method::POST, "/api/customers", Some(body)).await;
    assert_eq!(status, StatusCode::OK, "unexpected body: {}", created);
    created
}

pub fn assert_envelope(body: &Value, status: StatusCode, path: &str) {
    assert_eq!(body["status"], status.as_u16());
    assert_eq!(body["error"], status.canonical_reason().unwrap());
    assert_eq!(body["path"], path);
    assert!(body["timestamp"].is_string());
    assert!(body["message"].is_string());
}
