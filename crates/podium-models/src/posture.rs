//! Posture measurement and scoring models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::utils::round_to;

/// Weight of the craniovertebral angle score in the overall posture score.
pub const CVA_WEIGHT: f64 = 0.5;
/// Weight of the shoulder tilt score.
pub const TILT_WEIGHT: f64 = 0.2;
/// Weight of the bilateral shoulder symmetry score.
pub const SYMMETRY_WEIGHT: f64 = 0.15;
/// Weight of the anterior-posterior shoulder position score.
pub const POSITION_WEIGHT: f64 = 0.15;

/// Raw posture measurements for one frame.
///
/// Angles are in degrees. A degenerate input geometry (zero-length vector,
/// missing keypoint, division by zero) yields all-zero measurements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PostureMeasurement {
    /// Angle between horizontal and the shoulder-to-ear vector
    pub cva_angle: f64,
    /// Confidence interval of the CVA reference value
    pub cva_confidence: f64,
    /// Absolute angle of the shoulder line
    pub shoulder_tilt_angle: f64,
    /// Ratio of the higher to the lower shoulder height
    pub shoulder_symmetry_ratio: f64,
    /// Horizontal shoulder displacement relative to shoulder width, scaled ×50
    pub shoulder_ap_position: f64,
}

/// Posture sub-scores and weighted overall score, each in [0, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PostureScore {
    pub cva_score: f64,
    pub tilt_score: f64,
    pub symmetry_score: f64,
    pub position_score: f64,
    pub overall_score: f64,
}

impl PostureScore {
    /// Build a score from sub-scores, deriving the weighted overall score.
    pub fn from_sub_scores(cva: f64, tilt: f64, symmetry: f64, position: f64) -> Self {
        Self {
            cva_score: cva,
            tilt_score: tilt,
            symmetry_score: symmetry,
            position_score: position,
            overall_score: weighted_overall(cva, tilt, symmetry, position),
        }
    }

    /// All-zero score emitted for frames whose geometry could not be measured.
    pub fn degenerate() -> Self {
        Self::default()
    }
}

/// Weighted posture total: 0.5·cva + 0.2·tilt + 0.15·symmetry + 0.15·position.
pub fn weighted_overall(cva: f64, tilt: f64, symmetry: f64, position: f64) -> f64 {
    cva * CVA_WEIGHT + tilt * TILT_WEIGHT + symmetry * SYMMETRY_WEIGHT + position * POSITION_WEIGHT
}

/// Posture averages over every frame where a pose was detected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PostureAnalysis {
    pub craniovertebral_angle_score: f64,
    pub shoulder_tilt_score: f64,
    pub shoulder_symmetry_score: f64,
    pub shoulder_position_score: f64,
    pub overall_posture_score: f64,
}

impl PostureAnalysis {
    /// Build the output block from averaged sub-scores.
    ///
    /// Averages are rounded to 2 decimals; the overall score is recomputed
    /// from the unrounded averages.
    pub fn from_averages(cva: f64, tilt: f64, symmetry: f64, position: f64) -> Self {
        Self {
            craniovertebral_angle_score: round_to(cva, 2),
            shoulder_tilt_score: round_to(tilt, 2),
            shoulder_symmetry_score: round_to(symmetry, 2),
            shoulder_position_score: round_to(position, 2),
            overall_posture_score: round_to(weighted_overall(cva, tilt, symmetry, position), 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        let sum = CVA_WEIGHT + TILT_WEIGHT + SYMMETRY_WEIGHT + POSITION_WEIGHT;
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_sub_scores() {
        let score = PostureScore::from_sub_scores(100.0, 50.0, 0.0, 100.0);
        assert!((score.overall_score - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_analysis_field_names() {
        let analysis = PostureAnalysis::from_averages(100.0, 100.0, 100.0, 100.0);
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["overall_posture_score"], 100.0);
        assert!(json.get("craniovertebral_angle_score").is_some());
        assert!(json.get("shoulder_position_score").is_some());
    }
}
