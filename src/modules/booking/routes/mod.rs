use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use fluffy_events::{EventBus, Notification};
use fluffy_http::error::AppError;
use fluffy_store::RecordStore;
use serde::Serialize;
use serde_json::json;

use super::form::{BookingConfig, BookingForm, SubmitOutcome, FAILURE_MESSAGE};
use super::models::{self, BookingDraft, SelectOption};
use super::validation::ValidationErrors;

/// Shared by every request; each request still gets its own form.
#[derive(Clone)]
pub struct BookingState {
    pub store: Arc<dyn RecordStore>,
    pub events: EventBus,
    pub config: BookingConfig,
}

impl BookingState {
    fn form(&self) -> BookingForm {
        BookingForm::new(
            Arc::clone(&self.store),
            self.events.clone(),
            self.config.clone(),
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDefaults {
    pub draft: BookingDraft,
    pub pet_types: Vec<SelectOption>,
    pub service_types: Vec<SelectOption>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub notification: Notification,
    /// The form after submission, i.e. reset to its defaults.
    pub draft: BookingDraft,
}

pub fn router(state: BookingState) -> Router {
    Router::new()
        .route("/", post(submit_booking))
        .route("/form", get(form_defaults))
        .route("/health", get(health_check))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "booking module is healthy"
}

async fn form_defaults() -> Json<FormDefaults> {
    Json(FormDefaults {
        draft: BookingDraft::default(),
        pet_types: models::pet_options(),
        service_types: models::service_options(),
    })
}

async fn submit_booking(
    State(state): State<BookingState>,
    payload: Result<Json<BookingDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitResponse>), AppError> {
    let Json(draft) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

    let mut form = state.form().with_draft(draft);
    match form.submit().await {
        SubmitOutcome::Submitted { notification, .. } => Ok((
            StatusCode::CREATED,
            Json(SubmitResponse {
                notification,
                draft: form.draft().clone(),
            }),
        )),
        SubmitOutcome::Invalid(errors) => Err(validation_error(&errors)),
        SubmitOutcome::Failed { .. } => Err(AppError::upstream(FAILURE_MESSAGE)),
    }
}

fn validation_error(errors: &ValidationErrors) -> AppError {
    let details = errors
        .0
        .iter()
        .map(|error| {
            json!({
                "field": error.field,
                "error": error.constraint.code(),
                "message": error.message,
            })
        })
        .collect();
    AppError::validation(details, errors.to_string())
}
