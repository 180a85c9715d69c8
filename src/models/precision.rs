use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Minimum number of fractional digits the fair-share rate is carried at.
pub const MIN_RATE_SCALE: u32 = 10;

/// Fractional digits of settlement amounts (cents).
pub const DEFAULT_AMOUNT_SCALE: u32 = 2;

/// Round half away from zero.
pub const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Decimal precision used by a settlement run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Precision {
    /// Fractional digits kept on the fair-share rate.
    pub rate_scale: u32,
    /// Fractional digits of transaction amounts and zero-balance detection.
    pub amount_scale: u32,
}

impl Default for Precision {
    fn default() -> Self {
        Self {
            rate_scale: MIN_RATE_SCALE,
            amount_scale: DEFAULT_AMOUNT_SCALE,
        }
    }
}

impl Precision {
    /// Creates a precision, raising `rate_scale` to the supported minimum.
    pub fn new(rate_scale: u32, amount_scale: u32) -> Self {
        Self {
            rate_scale: rate_scale.max(MIN_RATE_SCALE),
            amount_scale,
        }
    }

    /// Rounds a quotient to exactly the rate scale.
    pub fn round_rate(&self, value: Decimal) -> Decimal {
        at_scale(value, self.rate_scale)
    }

    /// Rounds a monetary amount to exactly the amount scale.
    pub fn round_amount(&self, value: Decimal) -> Decimal {
        at_scale(value, self.amount_scale)
    }

    /// Returns true if the amount is zero once rounded to the amount scale.
    pub fn is_negligible(&self, value: Decimal) -> bool {
        self.round_amount(value).is_zero()
    }
}

/// Rounds half away from zero to `scale` digits and pads trailing zeros up to it.
fn at_scale(value: Decimal, scale: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(scale, ROUNDING);
    rounded.rescale(scale);
    rounded
}
