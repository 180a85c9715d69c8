use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SettlementError;

/// A single payment from a debtor to a creditor.
///
/// Only the settlement solver constructs these; the amount is already
/// rounded to the amount scale and always positive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SettlementTransaction<K> {
    pub from_participant_id: K,
    pub to_participant_id: K,
    pub amount: Decimal,
}

impl<K> SettlementTransaction<K> {
    pub(crate) fn new(from_participant_id: K, to_participant_id: K, amount: Decimal) -> Self {
        Self {
            from_participant_id,
            to_participant_id,
            amount,
        }
    }
}

impl<K: PartialEq> SettlementTransaction<K> {
    /// Returns true if the participant is the payer or the payee.
    pub fn involves(&self, participant_id: &K) -> bool {
        self.from_participant_id == *participant_id || self.to_participant_id == *participant_id
    }
}

/// Net effect of a transaction list on one participant: received minus paid.
pub fn net_transfer<K: PartialEq>(
    transactions: &[SettlementTransaction<K>],
    participant_id: &K,
) -> Result<Decimal, SettlementError> {
    transactions.iter().try_fold(Decimal::ZERO, |mut net, tx| {
        if tx.to_participant_id == *participant_id {
            net = net.checked_add(tx.amount).ok_or(SettlementError::ArithmeticOverflow)?;
        }
        if tx.from_participant_id == *participant_id {
            net = net.checked_sub(tx.amount).ok_or(SettlementError::ArithmeticOverflow)?;
        }
        Ok(net)
    })
}
