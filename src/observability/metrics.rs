use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Instant;
use tracing::{debug, info};

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Global metrics instance.
pub static METRICS: OnceLock<Metrics> = OnceLock::new();

/// Metrics collector for settlement runs.
#[derive(Debug, Clone, Default)]
pub struct Metrics;

impl Metrics {
    pub fn new() -> Self {
        Self
    }

    pub fn record_settlement(&self, participant_count: u64, transaction_count: u64) {
        counter!("ffp_settlements_total").increment(1);
        histogram!("ffp_settlement_participants").record(participant_count as f64);
        histogram!("ffp_settlement_transactions").record(transaction_count as f64);
    }

    pub fn record_settlement_failed(&self, reason: &str) {
        counter!("ffp_settlement_failures_total", "reason" => reason.to_string()).increment(1);
    }

    pub fn record_settlement_latency(&self, duration_ms: f64) {
        histogram!("ffp_settlement_duration_ms").record(duration_ms);
    }
}

/// Timer for measuring operation latency.
pub struct LatencyTimer {
    start: Instant,
}

impl LatencyTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for LatencyTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Installs the Prometheus recorder once and returns its handle.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    if let Some(handle) = METRICS_HANDLE.get() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    describe_metrics();
    METRICS.get_or_init(Metrics::new);

    Ok(METRICS_HANDLE.get_or_init(|| handle).clone())
}

fn describe_metrics() {
    describe_counter!(
        "ffp_settlements_total",
        Unit::Count,
        "Total number of completed settlement runs"
    );
    describe_counter!(
        "ffp_settlement_failures_total",
        Unit::Count,
        "Total number of failed settlement runs"
    );
    describe_histogram!(
        "ffp_settlement_participants",
        Unit::Count,
        "Contributions per settlement run"
    );
    describe_histogram!(
        "ffp_settlement_transactions",
        Unit::Count,
        "Transactions emitted per settlement run"
    );
    describe_histogram!(
        "ffp_settlement_duration_ms",
        Unit::Milliseconds,
        "Settlement latency in milliseconds"
    );
}

/// Renders the Prometheus exposition text and writes it to `path`,
/// or logs it at debug level when no path is configured.
pub fn export_metrics(handle: &PrometheusHandle, path: Option<&Path>) -> std::io::Result<()> {
    let rendered = handle.render();
    match path {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            info!("Metrics written to {}", path.display());
        }
        None => debug!(metrics = %rendered, "Metrics snapshot"),
    }
    Ok(())
}

/// Returns the global metrics instance.
pub fn get_metrics() -> &'static Metrics {
    METRICS.get_or_init(Metrics::new)
}
