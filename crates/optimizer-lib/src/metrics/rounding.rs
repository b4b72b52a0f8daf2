//! Two-decimal rounding shared by every metric step

/// Round to exactly two decimal places
///
/// Rounds the exact binary value of `value` rather than its shortest
/// decimal form, so `2.675` becomes `2.67` because its nearest `f64` sits
/// just below the midpoint.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.2}").parse().unwrap_or(value)
}

/// True when `value` has no significant digits past the second decimal
pub fn is_two_decimal(value: f64) -> bool {
    round2(value) == value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_basic() {
        assert_eq!(round2(54.0), 54.0);
        assert_eq!(round2(50.0 / 54.0), 0.93);
        assert_eq!(round2(69.0 / 70.0 * 100.0), 98.57);
        assert_eq!(round2(-4.8049), -4.8);
    }

    #[test]
    fn test_round2_uses_binary_value() {
        assert_eq!(round2(2.675), 2.67);
        assert_eq!(round2(1.005), 1.0);
    }

    #[test]
    fn test_round2_passes_non_finite_through() {
        assert!(round2(f64::NAN).is_nan());
        assert_eq!(round2(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_is_two_decimal() {
        assert!(is_two_decimal(98.57));
        assert!(!is_two_decimal(98.571));
    }
}
