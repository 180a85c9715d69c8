pub mod logging;
pub mod metrics;

pub use logging::{fmt_layer, init_logging, mask_amount, FmtLayer, LogConfig, LogFormat};
pub use metrics::{export_metrics, get_metrics, init_metrics, LatencyTimer, Metrics, METRICS};
