use adc_core::config::{LogConfig, LogFormat};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. Returns an error when a global
/// subscriber is already set, so callers that may run twice can ignore it.
pub fn init_tracing(config: &LogConfig) -> anyhow::Result<()> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    match config.format {
        LogFormat::Json => builder
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!("tracing subscriber already set: {e}"))?,
        LogFormat::Text => builder
            .try_init()
            .map_err(|e| anyhow::anyhow!("tracing subscriber already set: {e}"))?,
    }
    tracing::debug!(level = %config.level, format = ?config.format, "tracing initialised");
    Ok(())
}

fn build_filter(config: &LogConfig) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| anyhow::anyhow!("invalid log level {:?}: {e}", config.level)),
    }
}
