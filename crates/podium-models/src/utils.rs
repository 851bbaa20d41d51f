//! Numeric helpers shared by result builders.

/// Round `value` to `decimals` places.
///
/// Rounds the exact binary value, so `0.15` (stored just below the tie) goes
/// down, and exact ties such as `0.25` go to the even digit. Non-finite inputs
/// are returned unchanged.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.prec$}", prec = decimals as usize)
        .parse()
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_places() {
        assert!((round_to(12.3456, 2) - 12.35).abs() < 1e-9);
        assert!((round_to(89.94, 1) - 89.9).abs() < 1e-9);
        assert!((round_to(-1.25, 0) - -1.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_to_ties() {
        // 0.05 is stored just above the tie, 0.15 just below
        assert_eq!(round_to(0.05, 1), 0.1);
        assert_eq!(round_to(0.15, 1), 0.1);
        // exact ties go to even
        assert_eq!(round_to(0.25, 1), 0.2);
        assert_eq!(round_to(23.25, 1), 23.2);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(20.75, 1), 20.8);
    }

    #[test]
    fn test_round_to_passes_through_nan() {
        assert!(round_to(f64::NAN, 2).is_nan());
    }
}
