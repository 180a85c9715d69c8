use rust_decimal::Decimal;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Configuration for logging.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
    pub include_target: bool,
    pub include_file: bool,
    pub include_line: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            include_target: true,
            include_file: false,
            include_line: false,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

impl From<&str> for LogFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    }
}

/// Formatting layer selected by a [`LogConfig`].
pub type FmtLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Builds the formatting layer for `config`. Output goes to stderr so
/// stdout stays free for settlement output.
pub fn fmt_layer(config: &LogConfig) -> FmtLayer {
    let base = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.include_target)
        .with_file(config.include_file)
        .with_line_number(config.include_line);

    match config.format {
        LogFormat::Json => base.json().boxed(),
        LogFormat::Compact => base.compact().boxed(),
        LogFormat::Pretty => base.pretty().boxed(),
    }
}

/// Initializes the logging system with the given configuration.
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &LogConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    tracing_subscriber::registry()
        .with(fmt_layer(config))
        .with(env_filter)
        .init();

    tracing::info!(format = ?config.format, "Logging initialized with level: {}", config.level);
}

/// Masks amounts for logging (shows magnitude only).
pub fn mask_amount(amount: &Decimal) -> String {
    let abs = amount.abs();
    if abs >= Decimal::from(1_000_000) {
        "***M+".to_string()
    } else if abs >= Decimal::from(1_000) {
        "***K+".to_string()
    } else {
        "***".to_string()
    }
}
