//! Money calculation utilities using rust_decimal for precision
//!
//! All invoice arithmetic is done on `Decimal` internally, then converted to
//! `f64` for storage/serialization.

use rust_decimal::prelude::*;

/// Monetary values round to 2 decimal places, midpoint away from zero
const DECIMAL_PLACES: u32 = 2;

/// Flat tax rate applied to every invoice (10%)
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round a monetary amount to 2 decimal places, half away from zero
#[inline]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_decimal_precision() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let a = 0.1_f64;
        let b = 0.2_f64;
        assert_ne!(a + b, 0.3);

        let sum_dec = to_decimal(a) + to_decimal(b);
        assert_eq!(to_f64(sum_dec), 0.3);
    }

    #[test]
    fn test_tax_rate_value() {
        assert_eq!(TAX_RATE, Decimal::new(10, 2));
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(round2(Decimal::new(5, 3)).to_f64().unwrap(), 0.01); // 0.005
        assert_eq!(round2(Decimal::new(4, 3)).to_f64().unwrap(), 0.0); // 0.004
        assert_eq!(round2(Decimal::new(-5, 3)).to_f64().unwrap(), -0.01); // -0.005
    }

    #[test]
    fn test_to_decimal_non_finite_becomes_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
    }
}
