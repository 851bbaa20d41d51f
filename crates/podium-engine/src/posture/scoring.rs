//! Piecewise clinical scoring curves, each returning a score in [0, 100].

/// Optimal craniovertebral angle in degrees.
pub const CVA_OPTIMAL_DEG: f64 = 50.1;
/// Acceptable CVA band.
pub const CVA_BAND: (f64, f64) = (45.0, 55.0);
/// Shoulder tilt up to this angle scores full marks.
pub const TILT_THRESHOLD_DEG: f64 = 2.1;
/// Normal bilateral shoulder ratio band.
pub const SYMMETRY_BAND: (f64, f64) = (0.94, 1.03);
/// Normal anterior-posterior shoulder position band.
pub const POSITION_BAND: (f64, f64) = (46.0, 54.0);

/// Score a craniovertebral angle.
///
/// Outside the 45–55° band the score starts at 70 and loses 3 points per
/// degree. Inside the band, angles within `confidence` of 50.1° score 100 and
/// the rest lose 2 points per degree from 50.1°, never below 70.
pub fn cva_score(cva: f64, confidence: f64) -> f64 {
    let (low, high) = CVA_BAND;
    if cva < low {
        (70.0 - (low - cva) * 3.0).max(0.0)
    } else if cva > high {
        (70.0 - (cva - high) * 3.0).max(0.0)
    } else if (cva - CVA_OPTIMAL_DEG).abs() <= confidence {
        100.0
    } else {
        (100.0 - (cva - CVA_OPTIMAL_DEG).abs() * 2.0).max(70.0)
    }
}

/// Score a shoulder tilt angle.
pub fn tilt_score(sta: f64) -> f64 {
    if sta > TILT_THRESHOLD_DEG {
        (100.0 - (sta - TILT_THRESHOLD_DEG) * 15.0).max(0.0)
    } else {
        100.0
    }
}

/// Score a bilateral shoulder ratio.
pub fn symmetry_score(bsr: f64) -> f64 {
    let (low, high) = SYMMETRY_BAND;
    if bsr < low || bsr > high {
        (100.0 - (1.0 - bsr).abs() * 150.0).max(0.0)
    } else {
        100.0
    }
}

/// Score an anterior-posterior shoulder position.
pub fn position_score(apsp: f64) -> f64 {
    let (low, high) = POSITION_BAND;
    if apsp < low || apsp > high {
        let distance = (apsp - low).abs().min((apsp - high).abs());
        (100.0 - distance * 3.0).max(0.0)
    } else {
        100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_cva_optimal() {
        assert!((cva_score(50.1, 2.8) - 100.0).abs() < EPS);
        assert!((cva_score(52.9, 2.8) - 100.0).abs() < EPS);
    }

    #[test]
    fn test_cva_below_band() {
        assert!((cva_score(44.0, 2.8) - 67.0).abs() < EPS);
        assert!(cva_score(10.0, 2.8).abs() < EPS);
    }

    #[test]
    fn test_cva_above_band() {
        assert!((cva_score(60.0, 2.8) - 55.0).abs() < EPS);
    }

    #[test]
    fn test_cva_acceptable_band() {
        // 4.1° from optimal, outside the confidence interval
        assert!((cva_score(46.0, 2.8) - 91.8).abs() < EPS);
        // zero confidence still never drops below 70 inside the band
        assert!(cva_score(45.0, 0.0) >= 70.0);
    }

    #[test]
    fn test_tilt() {
        assert!((tilt_score(2.1) - 100.0).abs() < EPS);
        assert!((tilt_score(4.1) - 70.0).abs() < EPS);
        assert!(tilt_score(180.0).abs() < EPS);
    }

    #[test]
    fn test_symmetry() {
        assert!((symmetry_score(1.0) - 100.0).abs() < EPS);
        assert!((symmetry_score(1.1) - 85.0).abs() < 1e-6);
        assert!(symmetry_score(0.0).abs() < EPS);
    }

    #[test]
    fn test_position() {
        assert!((position_score(50.0) - 100.0).abs() < EPS);
        assert!((position_score(40.0) - 82.0).abs() < EPS);
        assert!((position_score(56.0) - 94.0).abs() < EPS);
        assert!(position_score(0.0) < 100.0);
    }
}
