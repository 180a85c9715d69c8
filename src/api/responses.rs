use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::requests::ValidationError;
use crate::error::SettlementError;
use crate::models::{
    ParticipantBalance, Precision, SettlementReport, SettlementSummary, SettlementTransaction,
};

/// Standard response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(error: ErrorResponse) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Vec<ValidationErrorDetail>) -> Self {
        self.details = Some(details);
        self
    }

    pub fn validation(errors: Vec<ValidationError>) -> Self {
        let details = errors
            .into_iter()
            .map(|e| ValidationErrorDetail { field: e.field, message: e.message })
            .collect();
        Self::new("VALIDATION_ERROR", "settlement request is invalid").with_details(details)
    }
}

impl From<SettlementError> for ErrorResponse {
    fn from(err: SettlementError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

/// Validation error detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    pub field: String,
    pub message: String,
}

/// Payment DTO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub from_participant_id: i64,
    pub to_participant_id: i64,
    pub amount: Decimal,
}

impl From<SettlementTransaction<i64>> for TransactionResponse {
    fn from(tx: SettlementTransaction<i64>) -> Self {
        Self {
            from_participant_id: tx.from_participant_id,
            to_participant_id: tx.to_participant_id,
            amount: tx.amount,
        }
    }
}

/// Participant balance DTO, rounded for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub participant_id: i64,
    pub value: Decimal,
    pub weight: Decimal,
    pub fair_share: Decimal,
    pub balance: Decimal,
}

impl BalanceResponse {
    fn from_balance(balance: ParticipantBalance<i64>, precision: &Precision) -> Self {
        Self {
            participant_id: balance.participant_id,
            value: balance.value,
            weight: balance.weight,
            fair_share: precision.round_amount(balance.fair_share),
            balance: precision.round_amount(balance.balance),
        }
    }
}

/// Settlement result DTO.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementResponse {
    pub event_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub fair_share_rate: Decimal,
    pub balances: Vec<BalanceResponse>,
    pub transactions: Vec<TransactionResponse>,
    pub summary: SettlementSummary,
    pub fingerprint: String,
}

impl From<SettlementReport<i64>> for SettlementResponse {
    fn from(report: SettlementReport<i64>) -> Self {
        let precision = report.precision;
        Self {
            event_id: report.event_id,
            generated_at: report.generated_at,
            fair_share_rate: report.fair_share_rate,
            balances: report
                .balances
                .into_iter()
                .map(|b| BalanceResponse::from_balance(b, &precision))
                .collect(),
            transactions: report.transactions.into_iter().map(TransactionResponse::from).collect(),
            summary: report.summary,
            fingerprint: report.fingerprint,
        }
    }
}
