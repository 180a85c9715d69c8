use thiserror::Error;

/// Failure of the settlement engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SettlementError {
    /// The contributions carry no weight, so there is no fair-share rate.
    #[error("division by zero: total contribution weight is zero")]
    DivisionByZero,

    /// An intermediate sum, product or quotient left the decimal range.
    #[error("arithmetic overflow while settling contributions")]
    ArithmeticOverflow,
}

impl SettlementError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            SettlementError::DivisionByZero => "DIVISION_BY_ZERO",
            SettlementError::ArithmeticOverflow => "ARITHMETIC_OVERFLOW",
        }
    }
}

/// Errors raised around the engine: configuration, input loading, validation.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Settlement(#[from] SettlementError),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settlement_error_display() {
        let err = SettlementError::DivisionByZero;
        assert_eq!(err.code(), "DIVISION_BY_ZERO");
        assert!(err.to_string().contains("division by zero"));
        assert_eq!(SettlementError::ArithmeticOverflow.code(), "ARITHMETIC_OVERFLOW");
    }

    #[test]
    fn test_app_error_wraps_settlement_error() {
        let err: AppError = SettlementError::DivisionByZero.into();
        assert!(matches!(err, AppError::Settlement(SettlementError::DivisionByZero)));
        assert_eq!(err.to_string(), SettlementError::DivisionByZero.to_string());
    }
}
