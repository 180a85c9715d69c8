use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Contribution, Precision};
use crate::error::SettlementError;

/// A participant's position relative to the fair-share rate of an event.
/// Derived from a contribution on every run, never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantBalance<K> {
    pub participant_id: K,
    /// Amount the participant actually paid.
    pub value: Decimal,
    pub weight: Decimal,
    /// `rate * weight`: what the participant should have paid.
    pub fair_share: Decimal,
    /// `value - fair_share`: positive = owed money, negative = owes money.
    pub balance: Decimal,
}

impl<K: Clone> ParticipantBalance<K> {
    /// Derives the balance of a contribution against a fair-share rate.
    pub fn from_contribution(
        contribution: &Contribution<K>,
        rate: Decimal,
    ) -> Result<Self, SettlementError> {
        let fair_share = rate
            .checked_mul(contribution.weight)
            .ok_or(SettlementError::ArithmeticOverflow)?;
        let balance = contribution
            .value
            .checked_sub(fair_share)
            .ok_or(SettlementError::ArithmeticOverflow)?;

        Ok(Self {
            participant_id: contribution.participant_id.clone(),
            value: contribution.value,
            weight: contribution.weight,
            fair_share,
            balance,
        })
    }
}

impl<K> ParticipantBalance<K> {
    /// Returns true if the participant is owed money.
    pub fn is_creditor(&self) -> bool {
        self.balance > Decimal::ZERO
    }

    /// Returns true if the participant owes money.
    pub fn is_debtor(&self) -> bool {
        self.balance < Decimal::ZERO
    }

    /// Returns true if the balance rounds to zero at the amount scale.
    pub fn is_settled(&self, precision: &Precision) -> bool {
        precision.is_negligible(self.balance)
    }

    /// Returns the absolute value of the balance.
    pub fn magnitude(&self) -> Decimal {
        self.balance.abs()
    }

    /// Returns the balance rounded to the amount scale.
    pub fn rounded_balance(&self, precision: &Precision) -> Decimal {
        precision.round_amount(self.balance)
    }
}
