#![allow(clippy::unwrap_used, clippy::expect_used)]
//! HTTP route tests exercising the router directly.

mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{BrokenForm, ContactForm, TestForm};
use formello_kernel::form::Form;
use formello_kernel::routes;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    let state = common::app_state([
        Form::new(ContactForm),
        Form::new(TestForm::default()),
        Form::new(BrokenForm),
    ]);
    routes::forms::router("forms")
        .merge(routes::health::router())
        .with_state(state)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post(app: Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_form_count() {
    let (status, body) = get(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["forms"], 3);
}

#[tokio::test]
async fn list_forms() {
    let (status, body) = get(app(), "/forms").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    assert_eq!(body["forms"]["contact"]["endpoint"], "/forms/contact");
    assert_eq!(body["forms"]["test"]["method"], "POST");
}

#[tokio::test]
async fn get_form_descriptor() {
    let (status, body) = get(app(), "/forms/contact").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "contact");
    assert_eq!(body["fields"].as_array().unwrap().len(), 6);
    assert_eq!(body["fields"][0]["type"], "text");
}

#[tokio::test]
async fn get_unknown_form_is_404() {
    let (status, body) = get(app(), "/forms/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "form not found");
    assert_eq!(body["message"], "form missing not found");
}

#[tokio::test]
async fn submit_valid_payload() {
    let (status, body) = post(
        app(),
        "/forms/test",
        json!({"name": "Widget", "description": "A widget."}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["result"], "Form handled successfully");
    assert_eq!(body["messages"][0], "Saved.");
}

#[tokio::test]
async fn submit_invalid_payload_is_422() {
    let (status, body) = post(app(), "/forms/test", json!({"name": "Widget"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert!(!body["errors"]["description"][0].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn submit_non_object_payload_validates_as_empty() {
    let (status, body) = post(app(), "/forms/test", json!("not an object")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["name"].is_array());
}

#[tokio::test]
async fn submit_handler_failure_is_422_with_error_envelope() {
    let (status, body) = post(app(), "/forms/broken", json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "storage unavailable");
}

#[tokio::test]
async fn submit_to_unknown_form_is_404() {
    let (status, body) = post(app(), "/forms/missing", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "form not found");
}
