//! Video analysis result models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::assessment::Assessment;
use crate::emotion::EmotionVector;
use crate::posture::PostureAnalysis;

/// Attentive versus inattentive sampled frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EyeContactAnalysis {
    pub looking_at_screen: u64,
    pub not_looking_at_screen: u64,
    /// Attentive share of sampled frames, 0-100
    pub attention_percentage: f64,
}

impl EyeContactAnalysis {
    /// Build from frame counts; the percentage is 0 when no frame was sampled.
    pub fn from_counts(looking: u64, not_looking: u64) -> Self {
        let total = looking + not_looking;
        let attention_percentage = if total > 0 {
            looking as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Self {
            looking_at_screen: looking,
            not_looking_at_screen: not_looking,
            attention_percentage,
        }
    }

    /// Number of sampled frames counted either way.
    pub fn total_frames(&self) -> u64 {
        self.looking_at_screen + self.not_looking_at_screen
    }
}

/// A closed time segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SegmentSummary {
    /// Segment start time in seconds
    pub time: f64,
    /// Mean weight per reported emotion label
    pub emotions: EmotionVector,
    /// Attentive samples divided by the expected samples per segment
    pub engagement: f64,
}

/// Engagement over time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EngagementPatterns {
    pub segments: Vec<SegmentSummary>,
    pub overall_engagement: f64,
    pub engagement_stability: f64,
}

/// Timing and coverage of the analysis pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PresentationMetrics {
    /// Video duration in seconds
    pub duration: f64,
    /// Number of decoded frames
    pub frames_analyzed: u64,
    /// Decoded frames per sampled frame, as a percentage
    pub analysis_quality: f64,
}

/// Complete result of one video pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoAnalysisResult {
    pub emotion_analysis: EmotionVector,
    pub eye_contact_analysis: EyeContactAnalysis,
    /// Null when no pose was ever detected
    pub posture_analysis: Option<PostureAnalysis>,
    pub engagement_patterns: EngagementPatterns,
    pub presentation_metrics: PresentationMetrics,
    pub assessment: Assessment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eye_contact_percentage() {
        let eye = EyeContactAnalysis::from_counts(75, 25);
        assert!((eye.attention_percentage - 75.0).abs() < 1e-9);
        assert_eq!(eye.total_frames(), 100);
    }

    #[test]
    fn test_eye_contact_zero_frames() {
        let eye = EyeContactAnalysis::from_counts(0, 0);
        assert!(eye.attention_percentage.abs() < f64::EPSILON);
    }

    #[test]
    fn test_segment_field_names() {
        let seg = SegmentSummary {
            time: 0.0,
            emotions: EmotionVector::neutral_default(),
            engagement: 0.5,
        };
        let json = serde_json::to_value(&seg).unwrap();
        assert_eq!(json["time"], 0.0);
        assert_eq!(json["emotions"]["neutral"], 1.0);
        assert_eq!(json["engagement"], 0.5);
    }

    #[test]
    fn test_result_schema_lists_contract_fields() {
        let schema = schemars::schema_for!(VideoAnalysisResult);
        let json = serde_json::to_value(&schema).unwrap();
        let props = &json["properties"];
        for field in [
            "emotion_analysis",
            "eye_contact_analysis",
            "posture_analysis",
            "engagement_patterns",
            "presentation_metrics",
            "assessment",
        ] {
            assert!(props.get(field).is_some(), "missing {field}");
        }
    }
}
