use adbook_core::config::{AppConfig, LoadOptions, LogFormat};
use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Logs go to stderr so stdout stays a single JSON payload.
///
/// An invalid config falls back to defaults here; the command itself reports the failure.
pub fn init(options: &LoadOptions) -> anyhow::Result<()> {
    let config = AppConfig::load(options.clone()).unwrap_or_default();
    let filter = EnvFilter::try_from_env("ADBOOK_LOG_FILTER")
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.trim()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let installed = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|error| anyhow!("failed to initialise logging: {error}"))
}
