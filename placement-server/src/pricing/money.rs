//! Minor-unit money helpers
//!
//! Currency amounts are integer minor units at rest. Intermediate
//! multiplier and discount arithmetic uses `rust_decimal`; every derived
//! figure is rounded back to whole minor units independently, never as a
//! running sum.

use rust_decimal::prelude::*;

/// Lift an integer minor-unit amount into `Decimal`
#[inline]
pub fn to_decimal(minor_units: i64) -> Decimal {
    Decimal::from(minor_units)
}

/// Round a decimal amount to whole minor units, half away from zero
#[inline]
pub fn round_minor(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_rounds_away_from_zero() {
        assert_eq!(round_minor(Decimal::new(2635, 1)), 264); // 263.5
        assert_eq!(round_minor(Decimal::new(2634, 1)), 263); // 263.4
        assert_eq!(round_minor(Decimal::new(-2635, 1)), -264);
    }

    #[test]
    fn test_whole_amounts_survive_round_trip() {
        assert_eq!(round_minor(to_decimal(10800)), 10800);
    }
}
