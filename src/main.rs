use anyhow::Context;
use fluffy_kernel::settings::Settings;
use fluffy_spa::{shutdown_signal, App};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load Fluffy Spa settings")?;
    fluffy_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        store = ?settings.store.backend,
        "fluffy-spa bootstrap starting"
    );

    let app = App::new(settings)?;
    app.boot().await?;

    let served = app.serve(shutdown_signal()).await;
    app.shutdown().await?;
    served
}
