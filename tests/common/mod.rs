#![allow(dead_code)]

use ffp_settlement::models::{Contribution, SettlementTransaction};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Builds contributions from `(participant_id, value, weight)` rows.
pub fn contributions(rows: &[(i64, &str, &str)]) -> Vec<Contribution<i64>> {
    rows.iter()
        .map(|&(id, value, weight)| Contribution::new(id, decimal(value), decimal(weight)))
        .collect()
}

pub fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).expect("invalid decimal literal")
}

/// Flattens transactions to `(from, to, amount)` for comparison.
pub fn flatten(transactions: &[SettlementTransaction<i64>]) -> Vec<(i64, i64, String)> {
    transactions
        .iter()
        .map(|tx| (tx.from_participant_id, tx.to_participant_id, tx.amount.to_string()))
        .collect()
}
