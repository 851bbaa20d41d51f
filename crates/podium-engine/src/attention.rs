//! Per-frame attention classification.
//!
//! Two strategies sit behind [`AttentionClassifier`]:
//! - [`FacePresenceClassifier`]: a frame is attentive when a face was found.
//! - [`GazeClassifier`]: both eyes must be open and looking at the center.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{AnalysisConfig, AttentionMode};
use crate::perception::{EyeContour, Perception};

/// Relative eye position at or below this is looking left.
pub const GAZE_LEFT_THRESHOLD: f64 = 0.35;
/// Relative eye position at or above this is looking right.
pub const GAZE_RIGHT_THRESHOLD: f64 = 0.65;

/// Horizontal gaze direction of one eye.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GazeDirection {
    Left,
    Center,
    Right,
}

impl GazeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            GazeDirection::Left => "left",
            GazeDirection::Center => "center",
            GazeDirection::Right => "right",
        }
    }
}

impl fmt::Display for GazeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Eye aspect ratio of a 6-point contour.
///
/// `(|p1 − p5| + |p2 − p4|) / (2·|p0 − p3|)`; 0 when the corners coincide.
pub fn eye_aspect_ratio(eye: &EyeContour) -> f64 {
    let vertical_a = eye.point(1).distance(&eye.point(5));
    let vertical_b = eye.point(2).distance(&eye.point(4));
    let horizontal = eye.point(0).distance(&eye.point(3));

    if horizontal == 0.0 {
        return 0.0;
    }
    (vertical_a + vertical_b) / (2.0 * horizontal)
}

/// Gaze direction from where the eye's mean x falls between its corners.
pub fn gaze_direction(eye: &EyeContour) -> GazeDirection {
    let width = eye.point(0).distance(&eye.point(3));
    if width == 0.0 {
        return GazeDirection::Center;
    }

    let relative_x = (eye.center_x() - eye.point(0).x) / width;
    if relative_x <= GAZE_LEFT_THRESHOLD {
        GazeDirection::Left
    } else if relative_x >= GAZE_RIGHT_THRESHOLD {
        GazeDirection::Right
    } else {
        GazeDirection::Center
    }
}

/// Decides whether a sampled frame counts as attentive.
pub trait AttentionClassifier: Send + Sync {
    fn is_attentive(&self, perception: &Perception) -> bool;

    /// Strategy name for logging.
    fn name(&self) -> &'static str;
}

/// Treats any detected face as attentive.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacePresenceClassifier;

impl AttentionClassifier for FacePresenceClassifier {
    fn is_attentive(&self, perception: &Perception) -> bool {
        perception.has_face()
    }

    fn name(&self) -> &'static str {
        "face_presence"
    }
}

/// Requires open eyes looking at the center.
#[derive(Debug, Clone, Copy)]
pub struct GazeClassifier {
    min_open_ear: f64,
}

impl GazeClassifier {
    pub fn new(min_open_ear: f64) -> Self {
        Self { min_open_ear }
    }
}

impl Default for GazeClassifier {
    fn default() -> Self {
        Self::new(AnalysisConfig::default().min_open_ear)
    }
}

impl AttentionClassifier for GazeClassifier {
    fn is_attentive(&self, perception: &Perception) -> bool {
        if !perception.has_face() {
            return false;
        }
        let Some((left, right)) = perception
            .eyes
            .and_then(|eyes| eyes.left.zip(eyes.right))
        else {
            return false;
        };

        let centered = gaze_direction(&left) == GazeDirection::Center
            && gaze_direction(&right) == GazeDirection::Center;
        let mean_ear = (eye_aspect_ratio(&left) + eye_aspect_ratio(&right)) / 2.0;

        centered && mean_ear >= self.min_open_ear
    }

    fn name(&self) -> &'static str {
        "gaze"
    }
}

/// Build the classifier selected by the configuration.
pub fn classifier_for(config: &AnalysisConfig) -> Box<dyn AttentionClassifier> {
    match config.attention {
        AttentionMode::FacePresence => Box::new(FacePresenceClassifier),
        AttentionMode::Gaze => Box::new(GazeClassifier::new(config.min_open_ear)),
    }
}
