use serde::Deserialize;

use crate::models::{Precision, DEFAULT_AMOUNT_SCALE, MIN_RATE_SCALE};
use crate::observability::{LogConfig, LogFormat};

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub input: InputSettings,
    #[serde(default)]
    pub metrics: MetricsSettings,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationSettings {
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,
    #[serde(default = "default_true")]
    pub log_include_target: bool,
    #[serde(default)]
    pub log_include_file: bool,
    #[serde(default)]
    pub log_include_line: bool,
}

#[derive(Debug, Deserialize)]
pub struct EngineSettings {
    pub rate_scale: u32,
    pub amount_scale: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            rate_scale: MIN_RATE_SCALE,
            amount_scale: DEFAULT_AMOUNT_SCALE,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct InputSettings {
    /// Contribution file read when no path is given on the command line.
    pub path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MetricsSettings {
    /// File the Prometheus snapshot is written to after a run; logged at
    /// debug level when unset.
    pub path: Option<String>,
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_true() -> bool {
    true
}

impl Settings {
    pub fn new() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .set_default("application.log_level", "info")?;

        builder.build()?.try_deserialize()
    }

    pub fn precision(&self) -> Precision {
        Precision::new(self.engine.rate_scale, self.engine.amount_scale)
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.application.log_level.clone(),
            format: LogFormat::from(self.application.log_format.as_str()),
            include_target: self.application.log_include_target,
            include_file: self.application.log_include_file,
            include_line: self.application.log_include_line,
        }
    }
}
