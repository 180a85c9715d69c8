use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Display;
use std::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use super::fair_share::fair_share_rate_with;
use crate::error::SettlementError;
use crate::idempotency::fingerprint;
use crate::models::{
    total_value, total_weight, Contribution, ParticipantBalance, Precision, SettlementReport,
    SettlementSummary, SettlementTransaction,
};
use crate::observability::{get_metrics, LatencyTimer};

/// Settles an event at the default precision: derives every participant's
/// balance against the fair-share rate and returns the payments that bring
/// all balances to zero.
///
/// Fails with [`SettlementError::DivisionByZero`] when the total weight is
/// zero, and with [`SettlementError::ArithmeticOverflow`] when the totals or
/// a balance leave the decimal range.
pub fn calculate_settlement<K: Ord + Clone>(
    contributions: &[Contribution<K>],
) -> Result<Vec<SettlementTransaction<K>>, SettlementError> {
    settle_with(contributions, &Precision::default())
}

/// Derives the balance of every contribution, settled ones included, in input order.
pub fn calculate_balances<K: Clone>(
    contributions: &[Contribution<K>],
) -> Result<Vec<ParticipantBalance<K>>, SettlementError> {
    derive_balances(contributions, &Precision::default()).map(|(_, balances)| balances)
}

fn derive_balances<K: Clone>(
    contributions: &[Contribution<K>],
    precision: &Precision,
) -> Result<(Decimal, Vec<ParticipantBalance<K>>), SettlementError> {
    let rate = fair_share_rate_with(contributions, precision)?;
    let balances = contributions
        .iter()
        .map(|c| ParticipantBalance::from_contribution(c, rate))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((rate, balances))
}

fn settle_with<K: Ord + Clone>(
    contributions: &[Contribution<K>],
    precision: &Precision,
) -> Result<Vec<SettlementTransaction<K>>, SettlementError> {
    let (_, balances) = derive_balances(contributions, precision)?;
    Ok(settle_balances(&balances, precision))
}

/// A creditor or debtor waiting in its queue. `remaining` is a magnitude.
#[derive(Debug)]
struct QueueEntry<K> {
    participant_id: K,
    remaining: Decimal,
}

/// Largest magnitude first, ascending participant id on ties.
fn by_magnitude<K: Ord>(a: &QueueEntry<K>, b: &QueueEntry<K>) -> Ordering {
    b.remaining
        .cmp(&a.remaining)
        .then_with(|| a.participant_id.cmp(&b.participant_id))
}

fn build_queue<'a, K, I>(balances: I) -> Vec<QueueEntry<K>>
where
    K: Ord + Clone + 'a,
    I: Iterator<Item = &'a ParticipantBalance<K>>,
{
    let mut queue: Vec<QueueEntry<K>> = balances
        .map(|b| QueueEntry {
            participant_id: b.participant_id.clone(),
            remaining: b.magnitude(),
        })
        .collect();
    queue.sort_by(by_magnitude);
    queue
}

/// Greedy two-cursor matching over the sorted creditor and debtor queues.
///
/// Queues are ordered once; only the head's remaining amount changes until
/// it is exhausted. A head is exhausted when the transfer covered all of it,
/// or when what is left rounds to zero. Slack below the amount scale is dropped.
fn settle_balances<K: Ord + Clone>(
    balances: &[ParticipantBalance<K>],
    precision: &Precision,
) -> Vec<SettlementTransaction<K>> {
    let open: Vec<&ParticipantBalance<K>> = balances
        .iter()
        .filter(|b| !b.is_settled(precision))
        .collect();
    let mut creditors = build_queue(open.iter().copied().filter(|b| b.is_creditor()));
    let mut debtors = build_queue(open.iter().copied().filter(|b| b.is_debtor()));

    debug!(
        creditors = creditors.len(),
        debtors = debtors.len(),
        settled = balances.len() - creditors.len() - debtors.len(),
        "Partitioned balances"
    );

    let bound = (creditors.len() + debtors.len()).saturating_sub(1);
    let mut transactions = Vec::with_capacity(bound);
    let (mut c, mut d) = (0, 0);

    while c < creditors.len() && d < debtors.len() {
        let creditor = &mut creditors[c];
        let debtor = &mut debtors[d];

        let creditor_exhausted = creditor.remaining <= debtor.remaining;
        let debtor_exhausted = debtor.remaining <= creditor.remaining;
        let amount = precision.round_amount(creditor.remaining.min(debtor.remaining));

        if amount > Decimal::ZERO {
            transactions.push(SettlementTransaction::new(
                debtor.participant_id.clone(),
                creditor.participant_id.clone(),
                amount,
            ));
        }

        creditor.remaining -= amount;
        debtor.remaining -= amount;

        if creditor_exhausted || precision.is_negligible(creditor.remaining) {
            c += 1;
        }
        if debtor_exhausted || precision.is_negligible(debtor.remaining) {
            d += 1;
        }
    }

    transactions
}

/// Cumulative counters of the runs a service has performed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettlementMetrics {
    pub runs_processed: u64,
    pub runs_failed: u64,
    pub transactions_emitted: u64,
    pub total_volume: Decimal,
}

/// Settlement engine bound to a precision, recording what it computes.
pub struct SettlementService {
    precision: Precision,
    metrics: RwLock<SettlementMetrics>,
}

impl Default for SettlementService {
    fn default() -> Self {
        Self::new(Precision::default())
    }
}

impl SettlementService {
    pub fn new(precision: Precision) -> Self {
        Self {
            precision,
            metrics: RwLock::new(SettlementMetrics::default()),
        }
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Weighted fair share per unit of weight.
    pub fn fair_share_rate<K>(
        &self,
        contributions: &[Contribution<K>],
    ) -> Result<Decimal, SettlementError> {
        fair_share_rate_with(contributions, &self.precision)
    }

    /// Balances of every contribution against the fair-share rate.
    pub fn balances<K: Clone>(
        &self,
        contributions: &[Contribution<K>],
    ) -> Result<Vec<ParticipantBalance<K>>, SettlementError> {
        derive_balances(contributions, &self.precision).map(|(_, balances)| balances)
    }

    /// Payments that settle the event.
    pub fn settle<K: Ord + Clone>(
        &self,
        contributions: &[Contribution<K>],
    ) -> Result<Vec<SettlementTransaction<K>>, SettlementError> {
        let timer = LatencyTimer::new();
        let result = settle_with(contributions, &self.precision);

        match &result {
            Ok(transactions) => {
                self.record_success(contributions.len(), transactions, timer.elapsed_ms())
            }
            Err(err) => self.record_failure(err),
        }

        result
    }

    /// Settles the event and packages balances, payments and figures.
    pub fn generate_report<K: Ord + Clone + Display>(
        &self,
        event_id: Uuid,
        contributions: &[Contribution<K>],
    ) -> Result<SettlementReport<K>, SettlementError> {
        let timer = LatencyTimer::new();

        let report = match self.build_report(event_id, contributions) {
            Ok(report) => report,
            Err(err) => {
                self.record_failure(&err);
                return Err(err);
            }
        };

        self.record_success(contributions.len(), &report.transactions, timer.elapsed_ms());

        info!(
            event_id = %event_id,
            participants = report.summary.participant_count,
            creditors = report.summary.creditors,
            debtors = report.summary.debtors,
            transactions = report.summary.transaction_count,
            residual = %report.summary.residual,
            "Settlement report generated"
        );

        Ok(report)
    }

    fn build_report<K: Ord + Clone + Display>(
        &self,
        event_id: Uuid,
        contributions: &[Contribution<K>],
    ) -> Result<SettlementReport<K>, SettlementError> {
        let (rate, balances) = derive_balances(contributions, &self.precision)?;
        let transactions = settle_balances(&balances, &self.precision);
        let summary = SettlementSummary::from_parts(&balances, &transactions, &self.precision)?;
        let fingerprint = fingerprint(rate, &transactions);

        Ok(SettlementReport {
            event_id,
            generated_at: Utc::now(),
            precision: self.precision,
            fair_share_rate: rate,
            total_value: total_value(contributions)?,
            total_weight: total_weight(contributions)?,
            balances,
            transactions,
            summary,
            fingerprint,
        })
    }

    fn record_success<K>(
        &self,
        participants: usize,
        transactions: &[SettlementTransaction<K>],
        duration_ms: f64,
    ) {
        let volume = transactions
            .iter()
            .fold(Decimal::ZERO, |sum, tx| sum.saturating_add(tx.amount));

        let metrics = get_metrics();
        metrics.record_settlement(participants as u64, transactions.len() as u64);
        metrics.record_settlement_latency(duration_ms);

        if let Ok(mut m) = self.metrics.write() {
            m.runs_processed += 1;
            m.transactions_emitted += transactions.len() as u64;
            m.total_volume = m.total_volume.saturating_add(volume);
        }
    }

    fn record_failure(&self, err: &SettlementError) {
        get_metrics().record_settlement_failed(err.code());

        if let Ok(mut m) = self.metrics.write() {
            m.runs_failed += 1;
        }
    }

    /// Gets cumulative metrics of this service.
    pub fn get_metrics(&self) -> SettlementMetrics {
        self.metrics.read().map(|m| m.clone()).unwrap_or_default()
    }
}
