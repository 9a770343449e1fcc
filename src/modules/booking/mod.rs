pub mod form;
pub mod models;
pub mod routes;
pub mod validation;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use fluffy_events::{Notification, NotificationKind};
use fluffy_kernel::{InitCtx, Migration, Module};
use once_cell::sync::OnceCell;
use tokio::sync::broadcast::{error::RecvError, Receiver};
use tokio::task::JoinHandle;

use form::BookingConfig;
use routes::BookingState;

/// Booking form module: validates and records booking requests
pub struct BookingModule {
    state: OnceCell<BookingState>,
    notification_log: Mutex<Option<JoinHandle<()>>>,
}

impl BookingModule {
    pub const fn new() -> Self {
        Self {
            state: OnceCell::new(),
            notification_log: Mutex::new(None),
        }
    }
}

impl Default for BookingModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for BookingModule {
    fn name(&self) -> &'static str {
        "booking"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let state = BookingState {
            store: Arc::clone(ctx.store),
            events: ctx.events.clone(),
            config: BookingConfig::from(&ctx.settings.store),
        };
        if self.state.set(state).is_err() {
            anyhow::bail!("booking module initialized twice");
        }

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            store = ctx.store.kind(),
            collection = %ctx.settings.store.collection,
            "booking module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        match self.state.get() {
            Some(state) => routes::router(state.clone()),
            None => {
                tracing::error!(module = self.name(), "routes requested before init; none mounted");
                Router::new()
            }
        }
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/": {
                    "post": {
                        "summary": "Submit a booking request",
                        "tags": ["Booking"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/BookingDraft" }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Booking recorded; the form is reset",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/SubmitResponse" }
                                    }
                                }
                            },
                            "400": {
                                "description": "Body is not a booking draft",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            },
                            "422": {
                                "description": "One or more fields need correction",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            },
                            "502": {
                                "description": "The booking store could not record the request",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                },
                "/form": {
                    "get": {
                        "summary": "Default form values and select options",
                        "tags": ["Booking"],
                        "responses": {
                            "200": {
                                "description": "Form defaults",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/FormDefaults" }
                                    }
                                }
                            }
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Booking health check",
                        "tags": ["Booking"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": { "text/plain": { "schema": { "type": "string" } } }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "BookingDraft": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string", "description": "Contact name" },
                            "phone": { "type": "string", "minLength": 6 },
                            "email": { "type": "string", "description": "Optional; blank or a valid address" },
                            "petType": { "type": "string", "enum": ["dog", "cat", "other"] },
                            "serviceType": { "type": "string", "enum": ["basic", "style", "care"] },
                            "date": { "type": "string", "description": "Optional preferred date, YYYY-MM-DD" },
                            "notes": { "type": "string" }
                        },
                        "required": ["name", "phone", "petType", "serviceType"]
                    },
                    "Notification": {
                        "type": "object",
                        "properties": {
                            "kind": { "type": "string", "enum": ["success", "error"] },
                            "title": { "type": "string" },
                            "description": { "type": "string" }
                        },
                        "required": ["kind", "title", "description"]
                    },
                    "SubmitResponse": {
                        "type": "object",
                        "properties": {
                            "notification": { "$ref": "#/components/schemas/Notification" },
                            "draft": { "$ref": "#/components/schemas/BookingDraft" }
                        },
                        "required": ["notification", "draft"]
                    },
                    "SelectOption": {
                        "type": "object",
                        "properties": {
                            "value": { "type": "string" },
                            "label": { "type": "string" }
                        },
                        "required": ["value", "label"]
                    },
                    "FormDefaults": {
                        "type": "object",
                        "properties": {
                            "draft": { "$ref": "#/components/schemas/BookingDraft" },
                            "petTypes": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/SelectOption" }
                            },
                            "serviceTypes": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/SelectOption" }
                            }
                        },
                        "required": ["draft", "petTypes", "serviceTypes"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: r#"
                CREATE TABLE IF NOT EXISTS bookings (
                    id           BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
                    created_at   TIMESTAMPTZ NOT NULL DEFAULT now(),
                    name         TEXT NOT NULL CHECK (name <> ''),
                    phone        TEXT NOT NULL CHECK (char_length(phone) >= 6),
                    email        TEXT,
                    pet_type     TEXT NOT NULL CHECK (pet_type IN ('dog', 'cat', 'other')),
                    service_type TEXT NOT NULL CHECK (service_type IN ('basic', 'style', 'care')),
                    date         DATE,
                    notes        TEXT
                );
                "#,
        }]
    }

    async fn start(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let handle = tokio::spawn(log_notifications(ctx.events.subscribe()));
        if let Some(previous) = self.lock_log().replace(handle) {
            previous.abort();
        }
        tracing::info!(module = self.name(), "booking module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        if let Some(handle) = self.lock_log().take() {
            handle.abort();
        }
        tracing::info!(module = self.name(), "booking module stopped");
        Ok(())
    }
}

impl BookingModule {
    fn lock_log(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.notification_log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Presentation-side consumer that records every notification shown to users.
async fn log_notifications(mut rx: Receiver<Notification>) {
    loop {
        match rx.recv().await {
            Ok(notification) => match notification.kind {
                NotificationKind::Success => tracing::info!(
                    target: "fluffy_spa::notifications",
                    title = %notification.title,
                    description = %notification.description,
                    "success notification"
                ),
                NotificationKind::Error => tracing::warn!(
                    target: "fluffy_spa::notifications",
                    title = %notification.title,
                    description = %notification.description,
                    "error notification"
                ),
            },
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "notification log fell behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

/// Create a new instance of the booking module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(BookingModule::new())
}
