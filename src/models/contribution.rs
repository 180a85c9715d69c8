use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SettlementError;

/// One participant's accounting record for an event.
///
/// `value` is what the participant actually paid (or was credited) and
/// `weight` is its share of the event, e.g. an attendance fraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution<K> {
    pub participant_id: K,
    pub value: Decimal,
    pub weight: Decimal,
}

impl<K> Contribution<K> {
    pub fn new(participant_id: K, value: Decimal, weight: Decimal) -> Self {
        Self {
            participant_id,
            value,
            weight,
        }
    }
}

/// Adds up decimals, failing instead of panicking when the sum leaves the range.
pub fn checked_sum<I>(values: I) -> Result<Decimal, SettlementError>
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().try_fold(Decimal::ZERO, |sum, value| {
        sum.checked_add(value).ok_or(SettlementError::ArithmeticOverflow)
    })
}

/// Total weight of a contribution set.
pub fn total_weight<K>(contributions: &[Contribution<K>]) -> Result<Decimal, SettlementError> {
    checked_sum(contributions.iter().map(|c| c.weight))
}

/// Total value of a contribution set.
pub fn total_value<K>(contributions: &[Contribution<K>]) -> Result<Decimal, SettlementError> {
    checked_sum(contributions.iter().map(|c| c.value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_contribution_creation() {
        let contribution = Contribution::new(7u32, dec!(12.50), dec!(0.5));

        assert_eq!(contribution.participant_id, 7);
        assert_eq!(contribution.value, dec!(12.50));
        assert_eq!(contribution.weight, dec!(0.5));
    }

    #[test]
    fn test_totals() {
        let contributions = vec![
            Contribution::new(1, dec!(10), dec!(1)),
            Contribution::new(2, dec!(-2.5), dec!(0.25)),
            Contribution::new(2, dec!(4), dec!(0)),
        ];

        assert_eq!(total_value(&contributions), Ok(dec!(11.5)));
        assert_eq!(total_weight(&contributions), Ok(dec!(1.25)));
    }

    #[test]
    fn test_totals_empty() {
        let contributions: Vec<Contribution<u32>> = Vec::new();
        assert_eq!(total_value(&contributions), Ok(Decimal::ZERO));
        assert_eq!(total_weight(&contributions), Ok(Decimal::ZERO));
    }

    #[test]
    fn test_total_value_overflow_is_an_error() {
        let contributions = vec![
            Contribution::new(1, Decimal::MAX, dec!(1)),
            Contribution::new(2, Decimal::MAX, dec!(1)),
        ];

        assert_eq!(total_value(&contributions), Err(SettlementError::ArithmeticOverflow));
        assert_eq!(total_weight(&contributions), Ok(dec!(2)));
    }
}
