//! Shared result models for presentation delivery analysis.
//!
//! This crate provides Serde-serializable types for:
//! - Emotion labels and per-frame emotion vectors
//! - Posture measurements and scores
//! - Video analysis results (eye contact, engagement, assessment)
//! - Audio analysis results (fillers, pauses, pace, energy, pitch)
//! - Structured error reports returned on fatal failures
//!
//! Field names follow the JSON contract consumed by existing clients, so
//! renames here are breaking changes.

pub mod assessment;
pub mod audio;
pub mod emotion;
pub mod error_report;
pub mod posture;
pub mod utils;
pub mod video;

// Re-export common types
pub use assessment::{Assessment, AssessmentMetrics, CompositeScore, DetailedScores, Rating};
pub use audio::{
    AudioAnalysisResult, AudioFeedback, EnergyAnalysis, EnergyLevel, FillerWordAnalysis,
    Paraphrase, ParaphraseKind, PauseAnalysis, PitchAnalysis, SpeechSpeed,
};
pub use emotion::{EmotionLabel, EmotionLabelParseError, EmotionVector};
pub use error_report::{ErrorDetails, ErrorReport};
pub use posture::{PostureAnalysis, PostureMeasurement, PostureScore};
pub use utils::round_to;
pub use video::{
    EngagementPatterns, EyeContactAnalysis, PresentationMetrics, SegmentSummary,
    VideoAnalysisResult,
};
