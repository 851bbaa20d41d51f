//! Angle and ratio measurements from 2-D keypoints.
//!
//! Coordinates are normalized image coordinates with y pointing down.
//! Mirroring is not corrected: a frontal, unmirrored view puts the subject's
//! left shoulder on the image right, which makes the shoulder line point
//! leftwards and the tilt angle close to 180°.

use crate::error::{EngineError, EngineResult};
use crate::perception::Point2;

/// Half-width of the 95% confidence interval around the optimal CVA.
pub const CVA_CONFIDENCE_DEG: f64 = 2.8;

/// Craniovertebral angle in degrees and its confidence interval.
///
/// Angle between the horizontal unit vector and the shoulder-to-ear vector.
/// A zero-length neck vector gives `(0.0, 0.0)`.
pub fn craniovertebral_angle(ear_mid: Point2, shoulder_mid: Point2) -> (f64, f64) {
    let neck_x = ear_mid.x - shoulder_mid.x;
    let neck_y = ear_mid.y - shoulder_mid.y;
    let norm = (neck_x * neck_x + neck_y * neck_y).sqrt();

    if norm == 0.0 || !norm.is_finite() {
        return (0.0, 0.0);
    }

    // dot((1, 0), neck) = neck_x
    let cos = (neck_x / norm).clamp(-1.0, 1.0);
    (cos.acos().to_degrees(), CVA_CONFIDENCE_DEG)
}

/// Shoulder tilt, bilateral ratio and anterior-posterior position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShoulderPosture {
    /// `|atan2(dy, dx)|` in degrees
    pub tilt_angle: f64,
    /// Higher shoulder y over lower shoulder y
    pub symmetry_ratio: f64,
    /// `|dx| / shoulder_width · 50`
    pub ap_position: f64,
}

/// Measure shoulder posture, failing on degenerate geometry.
///
/// Fails when the shoulders coincide, when either shoulder sits at y = 0
/// (the height ratio divides by it), or when any value is not finite.
pub fn try_shoulder_posture(left: Point2, right: Point2) -> EngineResult<ShoulderPosture> {
    if !left.is_finite() || !right.is_finite() {
        return Err(EngineError::frame_computation("non-finite shoulder coordinate"));
    }

    let dx = right.x - left.x;
    let dy = right.y - left.y;
    let width = left.distance(&right);
    if width == 0.0 {
        return Err(EngineError::frame_computation("zero shoulder width"));
    }

    let lower = left.y.min(right.y);
    if lower == 0.0 {
        return Err(EngineError::frame_computation("zero shoulder height"));
    }

    let posture = ShoulderPosture {
        tilt_angle: dy.atan2(dx).to_degrees().abs(),
        symmetry_ratio: left.y.max(right.y) / lower,
        ap_position: dx.abs() / width * 50.0,
    };

    if !posture.symmetry_ratio.is_finite() || !posture.ap_position.is_finite() {
        return Err(EngineError::frame_computation("non-finite shoulder measurement"));
    }

    Ok(posture)
}

/// Measure shoulder posture; degenerate geometry gives all zeros.
pub fn shoulder_posture(left: Point2, right: Point2) -> ShoulderPosture {
    try_shoulder_posture(left, right).unwrap_or_default()
}
