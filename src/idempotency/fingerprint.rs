use rust_decimal::Decimal;
use sha2::{Digest, Sha256};
use std::fmt::Display;

use crate::models::{Contribution, SettlementTransaction};

/// Fingerprint of a settlement result: hex SHA-256 over the fair-share rate
/// and the ordered transaction list. Identical runs yield identical keys.
pub fn fingerprint<K: Display>(rate: Decimal, transactions: &[SettlementTransaction<K>]) -> String {
    let mut hasher = Sha256::new();

    hasher.update(b"rate:");
    hasher.update(rate.normalize().to_string().as_bytes());

    for tx in transactions {
        hasher.update(b"|tx:");
        hasher.update(tx.from_participant_id.to_string().as_bytes());
        hasher.update(b">");
        hasher.update(tx.to_participant_id.to_string().as_bytes());
        hasher.update(b":");
        hasher.update(tx.amount.normalize().to_string().as_bytes());
    }

    hex::encode(hasher.finalize())
}

/// Key identifying a contribution set regardless of its order.
pub fn contribution_key<K: Ord + Display>(contributions: &[Contribution<K>]) -> String {
    let mut rows: Vec<(&K, Decimal, Decimal)> = contributions
        .iter()
        .map(|c| (&c.participant_id, c.value.normalize(), c.weight.normalize()))
        .collect();
    rows.sort();

    let mut hasher = Sha256::new();
    for (id, value, weight) in rows {
        hasher.update(b"|c:");
        hasher.update(id.to_string().as_bytes());
        hasher.update(b":");
        hasher.update(value.to_string().as_bytes());
        hasher.update(b":");
        hasher.update(weight.to_string().as_bytes());
    }

    format!("ffp_{}", hex::encode(hasher.finalize()))
}
