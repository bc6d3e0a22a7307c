//! Library desk - interactive catalogue and circulation console

use tokio::io::BufReader;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use library_desk::{config::LoggingConfig, shell::Shell, AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing; keep the guard alive so buffered lines get flushed
    let _guard = init_tracing(&config.logging);

    tracing::info!("Starting library desk v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::connect(config).await?;

    tracing::info!("Database ready");

    let mut shell = Shell::new(&state, BufReader::new(tokio::io::stdin()), tokio::io::stdout());
    shell.run().await?;

    tracing::info!("Shutting down");

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("library_desk={}", logging.level).into());

    // Log to a file when a directory is configured so the menu stays readable
    let (writer, guard) = match logging.directory {
        Some(ref directory) => {
            let appender = tracing_appender::rolling::daily(directory, "library-desk.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (tracing_subscriber::fmt::writer::BoxMakeWriter::new(writer), Some(guard))
        }
        None => (
            tracing_subscriber::fmt::writer::BoxMakeWriter::new(std::io::stderr),
            None,
        ),
    };

    let layer = if logging.format == "json" {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_ansi(logging.directory.is_none())
            .with_writer(writer)
            .boxed()
    };

    tracing_subscriber::registry().with(filter).with(layer).init();

    guard
}
