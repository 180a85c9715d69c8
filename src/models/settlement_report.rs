use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{checked_sum, ParticipantBalance, Precision, SettlementTransaction};
use crate::error::SettlementError;

/// Aggregate figures of a settlement run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementSummary {
    pub participant_count: usize,
    pub creditors: usize,
    pub debtors: usize,
    pub settled_participants: usize,
    pub transaction_count: usize,
    /// Sum of all transaction amounts.
    pub transferred_volume: Decimal,
    /// Slack the transactions leave unsettled, summed over participants.
    pub residual: Decimal,
}

impl SettlementSummary {
    /// Builds a summary from the derived balances and the emitted transactions.
    ///
    /// The residual is computed per participant id, so duplicate ids are
    /// netted together before their slack is measured.
    pub fn from_parts<K: Ord>(
        balances: &[ParticipantBalance<K>],
        transactions: &[SettlementTransaction<K>],
        precision: &Precision,
    ) -> Result<Self, SettlementError> {
        let settled_participants = balances.iter().filter(|b| b.is_settled(precision)).count();
        let creditors = balances
            .iter()
            .filter(|b| b.is_creditor() && !b.is_settled(precision))
            .count();
        let debtors = balances
            .iter()
            .filter(|b| b.is_debtor() && !b.is_settled(precision))
            .count();

        let transferred_volume = checked_sum(transactions.iter().map(|tx| tx.amount))?;

        // Outstanding amount per id: balance minus what the transactions moved.
        let mut outstanding: BTreeMap<&K, Decimal> = BTreeMap::new();
        for balance in balances {
            adjust(&mut outstanding, &balance.participant_id, balance.balance)?;
        }
        for tx in transactions {
            adjust(&mut outstanding, &tx.to_participant_id, -tx.amount)?;
            adjust(&mut outstanding, &tx.from_participant_id, tx.amount)?;
        }
        let residual = checked_sum(outstanding.values().map(|v| v.abs()))?;

        Ok(Self {
            participant_count: balances.len(),
            creditors,
            debtors,
            settled_participants,
            transaction_count: transactions.len(),
            transferred_volume,
            residual: precision.round_amount(residual),
        })
    }

    /// Upper bound on the transaction count of a greedy settlement.
    pub fn max_transactions(&self) -> usize {
        (self.creditors + self.debtors).saturating_sub(1)
    }
}

fn adjust<'a, K: Ord>(
    outstanding: &mut BTreeMap<&'a K, Decimal>,
    participant_id: &'a K,
    delta: Decimal,
) -> Result<(), SettlementError> {
    let entry = outstanding.entry(participant_id).or_insert(Decimal::ZERO);
    *entry = entry.checked_add(delta).ok_or(SettlementError::ArithmeticOverflow)?;
    Ok(())
}

/// Full result of settling one event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementReport<K> {
    pub event_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub precision: Precision,
    pub fair_share_rate: Decimal,
    pub total_value: Decimal,
    pub total_weight: Decimal,
    pub balances: Vec<ParticipantBalance<K>>,
    pub transactions: Vec<SettlementTransaction<K>>,
    pub summary: SettlementSummary,
    /// Hex SHA-256 over the rate and the transaction list.
    pub fingerprint: String,
}

impl<K> SettlementReport<K> {
    /// Returns true if no money needs to move.
    pub fn is_already_settled(&self) -> bool {
        self.transactions.is_empty()
    }
}
