//! The booking form controller.
//!
//! A [`BookingForm`] owns one draft for the lifetime of a booking attempt.
//! `submit` borrows the form mutably, so a second submit on the same form
//! cannot start while the first is waiting on the store.

use std::sync::Arc;
use std::time::Duration;

use fluffy_events::{EventBus, Notification};
use fluffy_kernel::settings::StoreSettings;
use fluffy_store::{RecordStore, StoreError};

use super::models::{BookingDraft, BookingField, BookingRecord};
use super::validation::{self, ValidationErrors};

/// Shown in the thank-you message when the name is blank.
pub const GUEST_LABEL: &str = "客人";
pub const SUCCESS_TITLE: &str = "預約已送出";
pub const FAILURE_TITLE: &str = "預約送出失敗";
pub const FAILURE_MESSAGE: &str = "目前無法送出預約，請稍後再試，或直接來電與我們聯繫。";

/// Where and how long to wait when recording a booking.
#[derive(Debug, Clone)]
pub struct BookingConfig {
    pub collection: String,
    pub timeout: Duration,
}

impl From<&StoreSettings> for BookingConfig {
    fn from(settings: &StoreSettings) -> Self {
        Self {
            collection: settings.collection.clone(),
            timeout: Duration::from_millis(settings.timeout_ms),
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self::from(&StoreSettings::default())
    }
}

/// Why a validated booking did not reach the store.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("store did not answer within {0:?}")]
    Timeout(Duration),

    #[error("failed to encode booking record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result of one press of the submit button.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Stored; the form has been reset.
    Submitted {
        record: BookingRecord,
        notification: Notification,
    },
    /// Nothing was sent; the draft is untouched.
    Invalid(ValidationErrors),
    /// The store call failed; the draft is untouched.
    Failed {
        error: SubmitError,
        notification: Notification,
    },
}

impl SubmitOutcome {
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            SubmitOutcome::Submitted { notification, .. }
            | SubmitOutcome::Failed { notification, .. } => Some(notification),
            SubmitOutcome::Invalid(_) => None,
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted { .. })
    }
}

pub struct BookingForm {
    draft: BookingDraft,
    store: Arc<dyn RecordStore>,
    events: EventBus,
    config: BookingConfig,
}

impl BookingForm {
    pub fn new(store: Arc<dyn RecordStore>, events: EventBus, config: BookingConfig) -> Self {
        Self {
            draft: BookingDraft::default(),
            store,
            events,
            config,
        }
    }

    /// Start from an already filled-in draft, e.g. one posted by a browser.
    pub fn with_draft(mut self, draft: BookingDraft) -> Self {
        self.draft = draft;
        self
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Record an edit. Nothing is validated until submit.
    pub fn update_field(&mut self, field: BookingField, value: impl Into<String>) {
        *self.draft.field_mut(field) = value.into();
    }

    pub fn validate(&self) -> Result<BookingRecord, ValidationErrors> {
        validation::validate(&self.draft)
    }

    pub fn reset(&mut self) {
        self.draft = BookingDraft::default();
    }

    /// Validate the draft and, if it passes, insert it into the store once.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let record = match self.validate() {
            Ok(record) => record,
            Err(errors) => {
                tracing::debug!(
                    fields = ?errors.fields().collect::<Vec<_>>(),
                    "booking draft failed validation"
                );
                return SubmitOutcome::Invalid(errors);
            }
        };

        match self.insert(&record).await {
            Ok(()) => {
                tracing::info!(
                    store = self.store.kind(),
                    collection = %self.config.collection,
                    pet_type = record.pet_type.as_str(),
                    service_type = record.service_type.as_str(),
                    "booking request recorded"
                );
                let notification = success_notification(&self.draft.name);
                self.events.publish(notification.clone());
                self.reset();
                SubmitOutcome::Submitted {
                    record,
                    notification,
                }
            }
            Err(error) => {
                tracing::warn!(
                    store = self.store.kind(),
                    collection = %self.config.collection,
                    error = %error,
                    "booking request could not be recorded"
                );
                let notification = Notification::error(FAILURE_TITLE, FAILURE_MESSAGE);
                self.events.publish(notification.clone());
                SubmitOutcome::Failed {
                    error,
                    notification,
                }
            }
        }
    }

    async fn insert(&self, record: &BookingRecord) -> Result<(), SubmitError> {
        let value = serde_json::to_value(record)?;
        let insert = self.store.insert(&self.config.collection, value);

        match tokio::time::timeout(self.config.timeout, insert).await {
            Ok(result) => result.map_err(SubmitError::from),
            Err(_) => Err(SubmitError::Timeout(self.config.timeout)),
        }
    }
}

fn success_notification(name: &str) -> Notification {
    let name = name.trim();
    let name = if name.is_empty() { GUEST_LABEL } else { name };
    Notification::success(SUCCESS_TITLE, format!("已收到預約需求，感謝 {name}！"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fluffy_events::NotificationKind;
    use fluffy_store::MemoryStore;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct SlowStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RecordStore for SlowStore {
        fn kind(&self) -> &'static str {
            "slow"
        }

        async fn insert(&self, _collection: &str, _record: serde_json::Value) -> Result<(), StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(())
        }
    }

    fn valid_draft() -> BookingDraft {
        BookingDraft {
            name: "王小明".to_string(),
            phone: "0912345678".to_string(),
            email: String::new(),
            pet_type: "dog".to_string(),
            service_type: "basic".to_string(),
            date: String::new(),
            notes: String::new(),
        }
    }

    fn form_with(store: Arc<dyn RecordStore>, events: &EventBus) -> BookingForm {
        BookingForm::new(store, events.clone(), BookingConfig::default()).with_draft(valid_draft())
    }

    #[test]
    fn update_field_only_touches_the_draft() {
        let store = Arc::new(MemoryStore::new());
        let mut form = BookingForm::new(store.clone(), EventBus::new(), BookingConfig::default());

        form.update_field(BookingField::Name, "Momo");
        form.update_field(BookingField::PetType, "cat");
        form.update_field(BookingField::Phone, "12");

        assert_eq!(form.draft().name, "Momo");
        assert_eq!(form.draft().pet_type, "cat");
        assert_eq!(form.draft().field(BookingField::Phone), "12");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn successful_submit_inserts_once_notifies_and_resets() {
        let store = Arc::new(MemoryStore::new());
        let events = EventBus::new();
        let mut toasts = events.subscribe();
        let mut form = form_with(store.clone(), &events);

        let outcome = form.submit().await;

        assert!(outcome.is_submitted());
        assert_eq!(
            store.records("bookings"),
            vec![json!({
                "name": "王小明",
                "phone": "0912345678",
                "email": null,
                "pet_type": "dog",
                "service_type": "basic",
                "date": null,
                "notes": null,
            })]
        );

        let toast = toasts.recv().await.unwrap();
        assert_eq!(toast.kind, NotificationKind::Success);
        assert!(toast.description.contains("王小明"));
        assert_eq!(outcome.notification(), Some(&toast));

        assert_eq!(*form.draft(), BookingDraft::default());
    }

    #[tokio::test]
    async fn failed_insert_keeps_the_draft_and_reports_generically() {
        let store = Arc::new(MemoryStore::new());
        store.set_rejecting(true);
        let events = EventBus::new();
        let mut toasts = events.subscribe();
        let mut form = form_with(store.clone(), &events);

        let outcome = form.submit().await;

        match &outcome {
            SubmitOutcome::Failed { error, notification } => {
                assert!(matches!(error, SubmitError::Store(StoreError::Unavailable(_))));
                assert_eq!(notification.description, FAILURE_MESSAGE);
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(toasts.recv().await.unwrap().kind, NotificationKind::Error);
        assert_eq!(*form.draft(), valid_draft());

        // A manual retry is an independent attempt.
        store.set_rejecting(false);
        assert!(form.submit().await.is_submitted());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_store() {
        let store = Arc::new(MemoryStore::new());
        let events = EventBus::new();
        let mut toasts = events.subscribe();
        let mut form = form_with(store.clone(), &events);
        form.update_field(BookingField::Name, "");
        let before = form.draft().clone();

        let outcome = form.submit().await;

        match outcome {
            SubmitOutcome::Invalid(errors) => assert!(errors.contains(BookingField::Name)),
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert!(store.is_empty());
        assert_eq!(*form.draft(), before);
        assert!(toasts.try_recv().is_err());
    }

    #[tokio::test]
    async fn slow_store_times_out_as_a_failure() {
        let store = Arc::new(SlowStore {
            calls: AtomicUsize::new(0),
        });
        let config = BookingConfig {
            collection: "bookings".to_string(),
            timeout: Duration::from_millis(50),
        };
        let mut form =
            BookingForm::new(store.clone(), EventBus::new(), config).with_draft(valid_draft());

        let outcome = form.submit().await;

        assert!(matches!(
            outcome,
            SubmitOutcome::Failed {
                error: SubmitError::Timeout(_),
                ..
            }
        ));
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
        assert_eq!(*form.draft(), valid_draft());
    }

    #[test]
    fn blank_name_falls_back_to_guest_label() {
        assert!(success_notification("").description.contains(GUEST_LABEL));
        assert!(success_notification("Momo").description.contains("Momo"));
    }

    #[test]
    fn config_follows_store_settings() {
        let settings = StoreSettings {
            collection: "grooming_bookings".to_string(),
            timeout_ms: 2500,
            ..StoreSettings::default()
        };
        let config = BookingConfig::from(&settings);
        assert_eq!(config.collection, "grooming_bookings");
        assert_eq!(config.timeout, Duration::from_millis(2500));
    }
}
