//! Wiring shared by the server binary and the CLI.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use fluffy_events::EventBus;
use fluffy_kernel::settings::{Settings, StoreBackend, StoreSettings};
use fluffy_kernel::{InitCtx, ModuleRegistry};
use fluffy_store::{MemoryStore, RecordStore, RestStore};

use crate::modules;
use crate::modules::booking::form::{BookingConfig, BookingForm};

/// A fully wired application: settings, store, notification bus and modules.
pub struct App {
    settings: Settings,
    store: Arc<dyn RecordStore>,
    events: EventBus,
    registry: ModuleRegistry,
}

impl App {
    /// Build the application with the store selected by `settings.store`.
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let store = connect_store(&settings.store)?;
        Self::with_store(settings, store)
    }

    pub fn with_store(settings: Settings, store: Arc<dyn RecordStore>) -> anyhow::Result<Self> {
        let mut registry = ModuleRegistry::new();
        modules::register_all(&mut registry).context("failed to register modules")?;

        Ok(Self {
            settings,
            store,
            events: EventBus::new(),
            registry,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    fn ctx(&self) -> InitCtx<'_> {
        InitCtx {
            settings: &self.settings,
            store: &self.store,
            events: &self.events,
        }
    }

    /// Initialize then start every module.
    pub async fn boot(&self) -> anyhow::Result<()> {
        let ctx = self.ctx();
        self.registry.init_modules(&ctx).await?;
        self.registry.start_modules(&ctx).await?;
        tracing::info!(
            env = ?self.settings.environment,
            store = self.store.kind(),
            modules = self.registry.module_count(),
            "fluffy-spa bootstrap complete"
        );
        Ok(())
    }

    /// Serve HTTP until `shutdown` resolves. Call after [`App::boot`].
    pub async fn serve<F>(&self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        fluffy_http::start_server(&self.registry, &self.settings, shutdown).await
    }

    pub async fn shutdown(&self) -> anyhow::Result<()> {
        self.registry.stop_modules().await
    }

    /// A fresh booking form wired to this application's store and bus.
    pub fn booking_form(&self) -> BookingForm {
        BookingForm::new(
            Arc::clone(&self.store),
            self.events.clone(),
            BookingConfig::from(&self.settings.store),
        )
    }
}

/// Resolves on Ctrl-C. If the handler cannot be installed the error is logged
/// and the future never resolves, so the server keeps running.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

/// Build the record store described by the settings.
pub fn connect_store(settings: &StoreSettings) -> anyhow::Result<Arc<dyn RecordStore>> {
    match settings.backend {
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; bookings are not persisted");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Rest => {
            if settings.api_key.is_none() {
                tracing::warn!(url = %settings.url, "REST store configured without an api key");
            }
            let store = RestStore::new(
                settings.url.clone(),
                settings.api_key.clone(),
                Duration::from_millis(settings.timeout_ms),
            )
            .context("failed to create REST store client")?;
            Ok(Arc::new(store))
        }
    }
}
