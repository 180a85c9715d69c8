use rust_decimal::Decimal;
use tracing::warn;

use crate::error::SettlementError;
use crate::models::{total_value, total_weight, Contribution, Precision};

/// Computes the weighted fair share per unit of weight at the default
/// precision: `sum(value) / sum(weight)`, rounded half away from zero to
/// ten fractional digits.
///
/// Fails with [`SettlementError::DivisionByZero`] when the total weight is
/// zero, which includes an empty contribution set, and with
/// [`SettlementError::ArithmeticOverflow`] when a total or the quotient
/// leaves the decimal range.
pub fn calculate_fair_share_rate<K>(
    contributions: &[Contribution<K>],
) -> Result<Decimal, SettlementError> {
    fair_share_rate_with(contributions, &Precision::default())
}

/// Same as [`calculate_fair_share_rate`] at an explicit precision.
pub fn fair_share_rate_with<K>(
    contributions: &[Contribution<K>],
    precision: &Precision,
) -> Result<Decimal, SettlementError> {
    let weight = total_weight(contributions)?;

    if weight.is_zero() {
        warn!(
            contribution_count = contributions.len(),
            "Fair-share rate requested for contributions without weight"
        );
        return Err(SettlementError::DivisionByZero);
    }

    let rate = total_value(contributions)?
        .checked_div(weight)
        .ok_or(SettlementError::ArithmeticOverflow)?;

    Ok(precision.round_rate(rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_weighted_average() {
        let contributions = vec![
            Contribution::new(1, dec!(0), dec!(0)),
            Contribution::new(2, dec!(1), dec!(1)),
            Contribution::new(3, dec!(2), dec!(2)),
        ];

        let rate = calculate_fair_share_rate(&contributions).unwrap();
        assert_eq!(rate, dec!(1.0000000000));
    }

    #[test]
    fn test_rate_is_weighted_not_arithmetic_mean() {
        let contributions = vec![
            Contribution::new(1, dec!(10), dec!(1)),
            Contribution::new(2, dec!(0), dec!(4)),
        ];

        // arithmetic mean of values would be 5
        assert_eq!(calculate_fair_share_rate(&contributions).unwrap(), dec!(2));
    }

    #[test]
    fn test_rate_rounds_half_away_from_zero() {
        let contributions = vec![
            Contribution::new(1, dec!(3.89), dec!(0.75)),
            Contribution::new(2, dec!(0), dec!(1.5)),
            Contribution::new(3, dec!(0), dec!(2)),
        ];

        // 3.89 / 4.25 = 0.91529411764705...
        assert_eq!(calculate_fair_share_rate(&contributions).unwrap(), dec!(0.9152941176));
    }

    #[test]
    fn test_negative_values() {
        let contributions = vec![
            Contribution::new(1, dec!(-3), dec!(1)),
            Contribution::new(2, dec!(1), dec!(1)),
        ];

        assert_eq!(calculate_fair_share_rate(&contributions).unwrap(), dec!(-1));
    }

    #[test]
    fn test_duplicate_participants_are_summed() {
        let contributions = vec![
            Contribution::new(1, dec!(4), dec!(1)),
            Contribution::new(1, dec!(2), dec!(1)),
        ];

        assert_eq!(calculate_fair_share_rate(&contributions).unwrap(), dec!(3));
    }

    #[test]
    fn test_zero_weight_fails() {
        let contributions = vec![
            Contribution::new(1, dec!(0), dec!(0)),
            Contribution::new(2, dec!(0), dec!(0)),
            Contribution::new(3, dec!(0), dec!(0)),
        ];

        assert_eq!(
            calculate_fair_share_rate(&contributions),
            Err(SettlementError::DivisionByZero)
        );
    }

    #[test]
    fn test_empty_fails() {
        let contributions: Vec<Contribution<u32>> = Vec::new();
        assert_eq!(
            calculate_fair_share_rate(&contributions),
            Err(SettlementError::DivisionByZero)
        );
    }

    #[test]
    fn test_zero_weight_wins_over_value_overflow() {
        let contributions = vec![
            Contribution::new(1, Decimal::MAX, dec!(0)),
            Contribution::new(2, Decimal::MAX, dec!(0)),
        ];

        assert_eq!(
            calculate_fair_share_rate(&contributions),
            Err(SettlementError::DivisionByZero)
        );
    }

    #[test]
    fn test_quotient_overflow_is_not_division_by_zero() {
        let contributions = vec![Contribution::new(1, Decimal::MAX, dec!(0.5))];

        assert_eq!(
            calculate_fair_share_rate(&contributions),
            Err(SettlementError::ArithmeticOverflow)
        );
    }

    #[test]
    fn test_value_overflow() {
        let contributions = vec![
            Contribution::new(1, Decimal::MAX, dec!(1)),
            Contribution::new(2, Decimal::MAX, dec!(1)),
        ];

        assert_eq!(
            calculate_fair_share_rate(&contributions),
            Err(SettlementError::ArithmeticOverflow)
        );
    }

    #[test]
    fn test_higher_rate_precision() {
        let contributions = vec![Contribution::new(1, dec!(1), dec!(3))];

        let rate = fair_share_rate_with(&contributions, &Precision::new(14, 2)).unwrap();
        assert_eq!(rate, dec!(0.33333333333333));
    }
}
