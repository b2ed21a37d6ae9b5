use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

/// Builds a subscriber that prints bunyan formatted JSON records to stdout.
/// `RUST_LOG` takes precedence over `env_filter` when it is set.
pub fn get_subscriber(name: String, env_filter: String) -> impl Subscriber + Send + Sync {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let formatting_layer = BunyanFormattingLayer::new(name, std::io::stdout);

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

#[derive(thiserror::Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to redirect log records to tracing.")]
    LogTracerError(#[from] log::SetLoggerError),
    #[error("Failed to set the global tracing subscriber.")]
    SubscriberError(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Registers `subscriber` as the process wide default. Must be called only once.
pub fn init_subscriber(
    subscriber: impl Subscriber + Send + Sync + 'static,
) -> Result<(), TelemetryError> {
    // actix-web emits `log` records, forward them to tracing
    LogTracer::init()?;
    set_global_default(subscriber)?;

    Ok(())
}
