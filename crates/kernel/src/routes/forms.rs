//! Form listing, retrieval, and submission endpoints.
//!
//! - `GET /{prefix}` — every registered form descriptor plus a count.
//! - `GET /{prefix}/{name}` — one descriptor, or 404 `{error, message}`.
//! - `POST /{prefix}/{name}` — submission envelope; 200 on success, 422 on
//!   validation or handler failure, 404 for an unknown form.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;

use crate::error::FormResult;
use crate::form::FormDescriptor;
use crate::state::AppState;
use crate::submission::SubmissionOutcome;

/// Response for the form listing endpoint.
#[derive(Serialize)]
struct FormListResponse {
    forms: BTreeMap<String, FormDescriptor>,
    count: usize,
}

/// List every registered form.
async fn list_forms(State(state): State<AppState>) -> Json<FormListResponse> {
    let forms = state.registry().get_all();
    let count = forms.len();
    Json(FormListResponse { forms, count })
}

/// Fetch one form descriptor.
async fn get_form(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> FormResult<Json<FormDescriptor>> {
    let form = state.registry().get(&name)?;
    Ok(Json(form.descriptor()))
}

/// Process a form submission.
async fn submit_form(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(body): Json<Value>,
) -> FormResult<(StatusCode, Json<SubmissionOutcome>)> {
    // Non-object payloads validate as an empty submission.
    let data = body.as_object().cloned().unwrap_or_default();

    let outcome = state.processor().process(&name, &data)?;
    let status = if outcome.is_success() {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };

    Ok((status, Json(outcome)))
}

/// Create the form router under the given URL prefix.
pub fn router(prefix: &str) -> Router<AppState> {
    Router::new()
        .route(&format!("/{prefix}"), get(list_forms))
        .route(
            &format!("/{prefix}/{{name}}"),
            get(get_form).post(submit_form),
        )
}
