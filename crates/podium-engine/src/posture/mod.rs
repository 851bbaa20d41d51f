//! Geometric posture estimation.
//!
//! Five body keypoints (nose, both ears, both shoulders) are turned into a
//! [`PostureMeasurement`] and then into a [`PostureScore`]. Failures never
//! escape a frame: a missing keypoint or degenerate geometry produces zero
//! scores and the frame is still counted.

pub mod geometry;
pub mod scoring;

use podium_models::{PostureAnalysis, PostureMeasurement, PostureScore};
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::metrics;
use crate::perception::{KeypointFrame, Landmark};

pub use geometry::{craniovertebral_angle, shoulder_posture, try_shoulder_posture, ShoulderPosture};
pub use scoring::{cva_score, position_score, symmetry_score, tilt_score};

/// Posture measurement and score for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PostureEstimate {
    pub measurement: PostureMeasurement,
    pub score: PostureScore,
    /// Some part of the computation failed and fell back to zeros.
    pub degenerate: bool,
}

/// Stateless posture estimator.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostureEstimator;

impl PostureEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Estimate posture for one frame.
    pub fn estimate(&self, keypoints: &KeypointFrame) -> PostureEstimate {
        match self.try_estimate(keypoints) {
            Ok(estimate) => estimate,
            Err(e) => {
                warn!(error = %e, "Posture computation failed, emitting zero scores");
                metrics::record_frame_recovered("posture");
                PostureEstimate {
                    degenerate: true,
                    ..PostureEstimate::default()
                }
            }
        }
    }

    /// Estimate posture, failing only when a keypoint is missing.
    ///
    /// Degenerate shoulder geometry is recovered here: the shoulder
    /// measurements and their three scores are zeroed while the CVA part is
    /// kept.
    pub fn try_estimate(&self, keypoints: &KeypointFrame) -> EngineResult<PostureEstimate> {
        let point = |lm: Landmark| {
            keypoints
                .get(lm)
                .ok_or_else(|| EngineError::frame_computation(format!("missing {}", lm.as_str())))
        };

        // The nose is part of the required landmark set even though the
        // angle only uses ears and shoulders.
        point(Landmark::Nose)?;
        let left_ear = point(Landmark::LeftEar)?;
        let right_ear = point(Landmark::RightEar)?;
        let left_shoulder = point(Landmark::LeftShoulder)?;
        let right_shoulder = point(Landmark::RightShoulder)?;

        let ear_mid = left_ear.midpoint(&right_ear);
        let shoulder_mid = left_shoulder.midpoint(&right_shoulder);
        let (cva, confidence) = craniovertebral_angle(ear_mid, shoulder_mid);
        let cva_points = cva_score(cva, confidence);

        let (shoulders, degenerate) = match try_shoulder_posture(left_shoulder, right_shoulder) {
            Ok(sp) => (sp, false),
            Err(e) => {
                warn!(error = %e, "Degenerate shoulder geometry");
                metrics::record_frame_recovered("shoulders");
                (ShoulderPosture::default(), true)
            }
        };

        let score = if degenerate {
            PostureScore::from_sub_scores(cva_points, 0.0, 0.0, 0.0)
        } else {
            PostureScore::from_sub_scores(
                cva_points,
                tilt_score(shoulders.tilt_angle),
                symmetry_score(shoulders.symmetry_ratio),
                position_score(shoulders.ap_position),
            )
        };

        Ok(PostureEstimate {
            measurement: PostureMeasurement {
                cva_angle: cva,
                cva_confidence: confidence,
                shoulder_tilt_angle: shoulders.tilt_angle,
                shoulder_symmetry_ratio: shoulders.symmetry_ratio,
                shoulder_ap_position: shoulders.ap_position,
            },
            score,
            degenerate,
        })
    }
}

/// Running sums of posture sub-scores over every frame with a pose.
#[derive(Debug, Clone, Default)]
pub struct PostureAccumulator {
    cva: f64,
    tilt: f64,
    symmetry: f64,
    position: f64,
    frames: u64,
}

impl PostureAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, score: &PostureScore) {
        self.cva += score.cva_score;
        self.tilt += score.tilt_score;
        self.symmetry += score.symmetry_score;
        self.position += score.position_score;
        self.frames += 1;
    }

    /// Number of frames recorded.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Averaged posture block, or `None` when no pose was ever recorded.
    pub fn finish(&self) -> Option<PostureAnalysis> {
        if self.frames == 0 {
            return None;
        }
        let n = self.frames as f64;
        Some(PostureAnalysis::from_averages(
            self.cva / n,
            self.tilt / n,
            self.symmetry / n,
            self.position / n,
        ))
    }
}
