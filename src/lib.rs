//! Fluffy Spa application library
//!
//! Landing page content plus the booking form workflow, packaged as modules
//! for the service kernel.

pub mod app;
pub mod modules;

pub use app::{shutdown_signal, App};
pub use modules::booking::form::{BookingForm, SubmitOutcome};
pub use modules::booking::models::{BookingDraft, BookingField, BookingRecord};
