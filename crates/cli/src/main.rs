use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use fluffy_kernel::settings::{LogFormat, Settings, TelemetrySettings};
use fluffy_spa::{shutdown_signal, App, BookingField, SubmitOutcome};

/// Exit status when the form had field errors and nothing was sent.
const EXIT_INVALID: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "fluffy", version, about = "Fluffy Spa booking service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server until Ctrl-C
    Serve,
    /// Fill in the booking form and submit it once
    Book(BookArgs),
    /// Print the effective settings with secrets redacted
    Config,
    /// Print the schema the booking store is expected to have
    Schema,
}

#[derive(Debug, Args)]
struct BookArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    email: Option<String>,
    /// dog, cat or other
    #[arg(long, default_value = "dog")]
    pet: String,
    /// basic, style or care
    #[arg(long, default_value = "basic")]
    service: String,
    /// Preferred date, YYYY-MM-DD
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

impl BookArgs {
    fn fields(self) -> Vec<(BookingField, String)> {
        let mut fields = vec![
            (BookingField::Name, self.name),
            (BookingField::Phone, self.phone),
            (BookingField::PetType, self.pet),
            (BookingField::ServiceType, self.service),
        ];
        fields.extend(self.email.map(|v| (BookingField::Email, v)));
        fields.extend(self.date.map(|v| (BookingField::Date, v)));
        fields.extend(self.notes.map(|v| (BookingField::Notes, v)));
        fields
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load Fluffy Spa settings")?;

    match cli.command {
        Command::Serve => {
            fluffy_telemetry::init(&settings.telemetry)?;
            serve(settings).await
        }
        Command::Book(args) => {
            // Keep stdout for the notification; logs only on warnings.
            fluffy_telemetry::init(&TelemetrySettings {
                log_format: LogFormat::Pretty,
                filter: "warn".to_string(),
            })?;
            book(settings, args).await
        }
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&settings.redacted())?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Schema => {
            let app = App::new(settings)?;
            for (module, migration) in app.registry().collect_migrations() {
                println!("-- {module}/{}", migration.id);
                println!("{}", migration.up.trim());
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn serve(settings: Settings) -> anyhow::Result<ExitCode> {
    tracing::info!(env = ?settings.environment, "fluffy serve starting");

    let app = App::new(settings)?;
    app.boot().await?;
    let served = app.serve(shutdown_signal()).await;
    app.shutdown().await?;
    served.map(|()| ExitCode::SUCCESS)
}

async fn book(settings: Settings, args: BookArgs) -> anyhow::Result<ExitCode> {
    let app = App::new(settings)?;
    let mut notifications = app.events().subscribe();

    let mut form = app.booking_form();
    for (field, value) in args.fields() {
        form.update_field(field, value);
    }

    let outcome = form.submit().await;

    // The form publishes before `submit` returns, so the toast is already queued.
    if let Ok(notification) = notifications.try_recv() {
        println!("{}: {}", notification.title, notification.description);
    }

    match outcome {
        SubmitOutcome::Submitted { .. } => Ok(ExitCode::SUCCESS),
        SubmitOutcome::Invalid(errors) => {
            for error in &errors.0 {
                eprintln!("{}: {}", error.field, error.message);
            }
            Ok(ExitCode::from(EXIT_INVALID))
        }
        SubmitOutcome::Failed { .. } => Ok(ExitCode::FAILURE),
    }
}
