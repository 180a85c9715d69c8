use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::models::Contribution;

/// One participant row of a settlement request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionRequest {
    pub participant_id: i64,
    pub value: Decimal,
    pub weight: Decimal,
}

impl From<&ContributionRequest> for Contribution<i64> {
    fn from(request: &ContributionRequest) -> Self {
        Contribution::new(request.participant_id, request.value, request.weight)
    }
}

/// Request to settle one event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementRequest {
    pub event_id: Option<Uuid>,
    pub contributions: Vec<ContributionRequest>,
}

/// Largest accepted absolute value or weight of a contribution row.
///
/// Keeps totals and balances of any realistic request inside the decimal range.
pub fn max_magnitude() -> Decimal {
    Decimal::from(1_000_000_000_000_000i64)
}

/// Validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl SettlementRequest {
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        if self.contributions.is_empty() {
            errors.push(ValidationError {
                field: "contributions".to_string(),
                message: "contributions cannot be empty".to_string(),
            });
        }

        let limit = max_magnitude();
        let mut seen = BTreeSet::new();
        for (i, c) in self.contributions.iter().enumerate() {
            if c.value.abs() > limit {
                errors.push(ValidationError {
                    field: format!("contributions[{}].value", i),
                    message: format!("value must not exceed {} in magnitude", limit),
                });
            }
            if c.weight > limit {
                errors.push(ValidationError {
                    field: format!("contributions[{}].weight", i),
                    message: format!("weight must not exceed {}", limit),
                });
            }
            if c.weight < Decimal::ZERO {
                errors.push(ValidationError {
                    field: format!("contributions[{}].weight", i),
                    message: "weight cannot be negative".to_string(),
                });
            }
            if !seen.insert(c.participant_id) {
                errors.push(ValidationError {
                    field: format!("contributions[{}].participant_id", i),
                    message: format!("participant {} appears more than once", c.participant_id),
                });
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Event id of the request, or a fresh one.
    pub fn event_id(&self) -> Uuid {
        self.event_id.unwrap_or_else(Uuid::new_v4)
    }

    pub fn to_contributions(&self) -> Vec<Contribution<i64>> {
        self.contributions.iter().map(Contribution::<i64>::from).collect()
    }
}
