use tariffy_core::config::{AppConfig, LogFormat, LoadOptions};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber from the loaded config. `RUST_LOG` wins over
/// `logging.level` when set. Output goes to stderr so command payloads on
/// stdout stay machine-readable.
pub fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // A subscriber may already be installed (tests); keep the existing one.
    let _ = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

/// Config errors are reported by the command itself, so logging is skipped
/// rather than failing early.
pub fn init_from_env() {
    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        init_logging(&config);
    }
}
