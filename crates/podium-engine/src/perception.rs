//! Perception collaborator interface.
//!
//! Decoding video and running the face-mesh, pose and emotion models happen
//! outside the engine. A [`PerceptionProvider`] is constructed by the caller
//! and injected into the pipeline, so tests can feed synthetic keypoints and
//! emotion vectors without any model.

use podium_models::EmotionVector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

use crate::error::EngineResult;

/// A 2-D point in normalized image coordinates (x, y in [0, 1], y down).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point2) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Midpoint between two points.
    pub fn midpoint(&self, other: &Point2) -> Point2 {
        Point2::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Body landmarks used by the posture estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Landmark {
    Nose,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
}

impl Landmark {
    pub const ALL: &'static [Landmark] = &[
        Landmark::Nose,
        Landmark::LeftEar,
        Landmark::RightEar,
        Landmark::LeftShoulder,
        Landmark::RightShoulder,
    ];

    /// Index of the landmark in a 33-point pose landmark list.
    pub fn pose_index(&self) -> usize {
        match self {
            Landmark::Nose => 0,
            Landmark::LeftEar => 7,
            Landmark::RightEar => 8,
            Landmark::LeftShoulder => 11,
            Landmark::RightShoulder => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Landmark::Nose => "nose",
            Landmark::LeftEar => "left_ear",
            Landmark::RightEar => "right_ear",
            Landmark::LeftShoulder => "left_shoulder",
            Landmark::RightShoulder => "right_shoulder",
        }
    }
}

/// Named body keypoints for one frame.
///
/// Consumed by the posture estimator and dropped with the frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeypointFrame(BTreeMap<Landmark, Point2>);

impl KeypointFrame {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Pick the five posture landmarks out of a full pose landmark list.
    ///
    /// Landmarks beyond the end of the list are left out.
    pub fn from_pose_landmarks(landmarks: &[Point2]) -> Self {
        Landmark::ALL
            .iter()
            .filter_map(|&lm| landmarks.get(lm.pose_index()).map(|p| (lm, *p)))
            .collect()
    }

    /// Builder-style setter for a landmark.
    pub fn with(mut self, landmark: Landmark, point: Point2) -> Self {
        self.0.insert(landmark, point);
        self
    }

    pub fn insert(&mut self, landmark: Landmark, point: Point2) {
        self.0.insert(landmark, point);
    }

    pub fn get(&self, landmark: Landmark) -> Option<Point2> {
        self.0.get(&landmark).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Landmark, Point2)> for KeypointFrame {
    fn from_iter<I: IntoIterator<Item = (Landmark, Point2)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Six-point eye contour: p0 and p3 are the corners, p1/p2 the upper lid and
/// p5/p4 the lower lid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EyeContour(pub [Point2; 6]);

impl EyeContour {
    pub fn point(&self, i: usize) -> Point2 {
        self.0[i % 6]
    }

    /// Mean x coordinate of the contour.
    pub fn center_x(&self) -> f64 {
        self.0.iter().map(|p| p.x).sum::<f64>() / 6.0
    }
}

/// Eye contours from the face mesh. Either eye may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EyePair {
    #[serde(default)]
    pub left: Option<EyeContour>,
    #[serde(default)]
    pub right: Option<EyeContour>,
}

impl EyePair {
    pub fn both(left: EyeContour, right: EyeContour) -> Self {
        Self {
            left: Some(left),
            right: Some(right),
        }
    }
}

/// Everything the perception models reported for one sampled frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Perception {
    /// Face mesh found, or the emotion classifier returned a result.
    #[serde(default)]
    pub face_detected: bool,
    #[serde(default)]
    pub eyes: Option<EyePair>,
    #[serde(default)]
    pub keypoints: Option<KeypointFrame>,
    #[serde(default)]
    pub emotion: Option<EmotionVector>,
}

impl Perception {
    /// A frame in which nothing was detected.
    pub fn nothing() -> Self {
        Self::default()
    }

    /// A detected face with an optional emotion vector.
    pub fn face(emotion: Option<EmotionVector>) -> Self {
        Self {
            face_detected: true,
            emotion,
            ..Self::default()
        }
    }

    /// True when a face mesh was found or the emotion classifier reported.
    pub fn has_face(&self) -> bool {
        self.face_detected || self.emotion.as_ref().is_some_and(|e| !e.is_empty())
    }

    pub fn with_keypoints(mut self, keypoints: KeypointFrame) -> Self {
        self.keypoints = Some(keypoints);
        self
    }

    pub fn with_eyes(mut self, eyes: EyePair) -> Self {
        self.eyes = Some(eyes);
        self
    }
}

/// Properties of the decoded stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamInfo {
    /// Source identifier (usually the file path); only its base name is used.
    pub source_name: String,
    pub fps: f64,
    /// Number of decoded frames.
    pub total_frames: u64,
}

/// A sampled frame ready for the per-frame stage.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameObservation {
    /// 1-based decoded frame number.
    pub frame_number: u64,
    /// Seconds, `frame_number / fps`.
    pub timestamp: f64,
    pub perception: Perception,
}

/// Source of decoded frames and their perception results.
///
/// Implementations own the decode handle and the model sessions. The
/// pipeline wraps the provider in a [`ProviderGuard`] so [`release`] runs on
/// every exit path.
///
/// [`release`]: PerceptionProvider::release
pub trait PerceptionProvider: Send {
    /// Frame rate and frame count of the stream.
    fn stream_info(&self) -> EngineResult<StreamInfo>;

    /// Perceive the decoded frame `frame_number` (1-based).
    fn perceive(&mut self, frame_number: u64, timestamp: f64) -> EngineResult<Perception>;

    /// Release the decode handle and model sessions.
    fn release(&mut self) {}

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}

/// Scoped access to a provider that releases it when dropped.
pub struct ProviderGuard<'a, P: PerceptionProvider + ?Sized> {
    provider: &'a mut P,
}

impl<'a, P: PerceptionProvider + ?Sized> ProviderGuard<'a, P> {
    pub fn new(provider: &'a mut P) -> Self {
        Self { provider }
    }
}

impl<P: PerceptionProvider + ?Sized> Deref for ProviderGuard<'_, P> {
    type Target = P;

    fn deref(&self) -> &Self::Target {
        self.provider
    }
}

impl<P: PerceptionProvider + ?Sized> DerefMut for ProviderGuard<'_, P> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.provider
    }
}

impl<P: PerceptionProvider + ?Sized> Drop for ProviderGuard<'_, P> {
    fn drop(&mut self) {
        tracing::debug!(provider = self.provider.name(), "Releasing perception provider");
        self.provider.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pose_landmarks_picks_indices() {
        let landmarks: Vec<Point2> = (0..33).map(|i| Point2::new(i as f64, 0.0)).collect();
        let kp = KeypointFrame::from_pose_landmarks(&landmarks);
        assert_eq!(kp.get(Landmark::Nose), Some(Point2::new(0.0, 0.0)));
        assert_eq!(kp.get(Landmark::RightEar), Some(Point2::new(8.0, 0.0)));
        assert_eq!(kp.get(Landmark::RightShoulder), Some(Point2::new(12.0, 0.0)));
    }

    #[test]
    fn test_from_short_landmark_list() {
        let landmarks = vec![Point2::new(0.5, 0.5); 10];
        let kp = KeypointFrame::from_pose_landmarks(&landmarks);
        assert!(kp.get(Landmark::LeftEar).is_some());
        assert!(kp.get(Landmark::LeftShoulder).is_none());
    }

    #[test]
    fn test_point_geometry() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
        assert_eq!(a.midpoint(&b), Point2::new(1.5, 2.0));
        assert!(!Point2::new(f64::NAN, 0.0).is_finite());
    }

    #[test]
    fn test_keypoints_deserialize_by_name() {
        let json = r#"{"nose": {"x": 0.5, "y": 0.2}, "left_shoulder": {"x": 0.4, "y": 0.6}}"#;
        let kp: KeypointFrame = serde_json::from_str(json).unwrap();
        assert_eq!(kp.get(Landmark::LeftShoulder), Some(Point2::new(0.4, 0.6)));
    }

    struct Counting {
        released: usize,
    }

    impl PerceptionProvider for Counting {
        fn stream_info(&self) -> EngineResult<StreamInfo> {
            Ok(StreamInfo {
                source_name: "counting".to_string(),
                fps: 30.0,
                total_frames: 0,
            })
        }

        fn perceive(&mut self, _: u64, _: f64) -> EngineResult<Perception> {
            Ok(Perception::nothing())
        }

        fn release(&mut self) {
            self.released += 1;
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let mut provider = Counting { released: 0 };
        {
            let mut guard = ProviderGuard::new(&mut provider);
            guard.perceive(1, 0.0).unwrap();
        }
        assert_eq!(provider.released, 1);
    }
}
