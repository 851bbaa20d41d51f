//! Configuration for video and audio analysis.
//!
//! Defaults: every 3rd frame sampled, 10 s segments, the trailing partial
//! segment dropped, "face present" attention and the deterministic composite
//! score.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// How a sampled frame is judged attentive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AttentionMode {
    /// Any detected face counts as attentive.
    #[default]
    FacePresence,
    /// Both eyes open and gazing at the center.
    Gaze,
}

impl AttentionMode {
    /// Returns the mode name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttentionMode::FacePresence => "face_presence",
            AttentionMode::Gaze => "gaze",
        }
    }
}

impl fmt::Display for AttentionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AttentionMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "face_presence" | "face" => Ok(AttentionMode::FacePresence),
            "gaze" => Ok(AttentionMode::Gaze),
            _ => Err(EngineError::invalid_config(format!(
                "Unknown attention mode: {s}"
            ))),
        }
    }
}

/// Composite scoring formula for the video assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Content-driven formula; identical inputs give identical scores.
    #[default]
    Deterministic,
    /// Seeded per-file scoring: the factors depend on an MD5 of the source
    /// file's base name.
    ///
    /// Two recordings with identical content but different file names score
    /// differently.
    Seeded,
}

impl ScoringMode {
    /// Returns the mode name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMode::Deterministic => "deterministic",
            ScoringMode::Seeded => "seeded",
        }
    }
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ScoringMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "deterministic" => Ok(ScoringMode::Deterministic),
            "seeded" => Ok(ScoringMode::Seeded),
            _ => Err(EngineError::invalid_config(format!("Unknown scoring mode: {s}"))),
        }
    }
}

/// Configuration for a video analysis pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Analyze every Nth decoded frame.
    ///
    /// Also divides the expected number of samples per segment.
    /// - Default: 3
    pub sample_stride: u64,

    /// Length of an engagement segment in seconds.
    ///
    /// A segment closes when a sample arrives at least this long after the
    /// segment start. The next segment starts at that sample's timestamp.
    /// - Default: 10.0
    pub segment_duration_secs: f64,

    /// Flush the trailing partial segment at end of stream.
    ///
    /// When off, recordings shorter than one segment report no segments at
    /// all.
    /// - Default: false
    pub flush_final_segment: bool,

    /// Attention classification strategy.
    pub attention: AttentionMode,

    /// Minimum mean eye aspect ratio for an eye to count as open.
    ///
    /// Only used by [`AttentionMode::Gaze`].
    /// - Default: 0.2
    pub min_open_ear: f64,

    /// Composite scoring strategy.
    pub scoring: ScoringMode,

    /// Evaluate posture and attention for batches of samples on the rayon pool.
    ///
    /// Results are still folded into segments in frame order.
    pub parallel_frames: bool,

    /// Number of samples per parallel batch.
    pub batch_size: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_stride: 3,
            segment_duration_secs: 10.0,
            flush_final_segment: false,
            attention: AttentionMode::FacePresence,
            min_open_ear: 0.2,
            scoring: ScoringMode::Deterministic,
            parallel_frames: false,
            batch_size: 64,
        }
    }
}

impl AnalysisConfig {
    /// Geometric gaze attention with the trailing segment kept.
    pub fn gaze_aware() -> Self {
        Self {
            attention: AttentionMode::Gaze,
            flush_final_segment: true,
            ..Self::default()
        }
    }

    /// Builder-style setter for the sample stride (minimum 1).
    pub fn with_sample_stride(mut self, stride: u64) -> Self {
        self.sample_stride = stride.max(1);
        self
    }

    /// Builder-style setter for the segment duration (minimum 0.1 s).
    pub fn with_segment_duration(mut self, secs: f64) -> Self {
        self.segment_duration_secs = secs.max(0.1);
        self
    }

    /// Builder-style setter for flushing the trailing segment.
    pub fn with_flush_final_segment(mut self, flush: bool) -> Self {
        self.flush_final_segment = flush;
        self
    }

    /// Builder-style setter for the attention strategy.
    pub fn with_attention(mut self, mode: AttentionMode) -> Self {
        self.attention = mode;
        self
    }

    /// Builder-style setter for the open-eye threshold.
    pub fn with_min_open_ear(mut self, ear: f64) -> Self {
        self.min_open_ear = ear.clamp(0.0, 1.0);
        self
    }

    /// Builder-style setter for the scoring strategy.
    pub fn with_scoring(mut self, mode: ScoringMode) -> Self {
        self.scoring = mode;
        self
    }

    /// Builder-style setter for parallel frame evaluation.
    pub fn with_parallel_frames(mut self, parallel: bool) -> Self {
        self.parallel_frames = parallel;
        self
    }

    /// Builder-style setter for the parallel batch size (minimum 1).
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }
}

/// Per-filler penalty applied by the audio composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FillerPenalty {
    /// 1.5 points per filler word.
    #[default]
    Standard,
    /// 2 points per filler word.
    Strict,
}

impl FillerPenalty {
    /// Points deducted per filler word.
    pub fn per_filler(&self) -> f64 {
        match self {
            FillerPenalty::Standard => 1.5,
            FillerPenalty::Strict => 2.0,
        }
    }

    /// Returns the variant name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            FillerPenalty::Standard => "standard",
            FillerPenalty::Strict => "strict",
        }
    }
}

impl fmt::Display for FillerPenalty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FillerPenalty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(FillerPenalty::Standard),
            "strict" => Ok(FillerPenalty::Strict),
            _ => Err(EngineError::invalid_config(format!(
                "Unknown filler penalty: {s}"
            ))),
        }
    }
}

/// Configuration for an audio analysis pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Gaps longer than this many seconds are long pauses.
    /// - Default: 0.5
    pub pause_threshold_secs: f64,

    /// Ideal speaking rate in words per minute.
    /// - Default: 150
    pub target_wpm: f64,

    /// Accepted distance from the target rate.
    /// - Default: 20
    pub wpm_tolerance: f64,

    /// Mean RMS above which (together with pitch variation) energy is high.
    pub high_energy_rms: f64,

    /// Pitch standard deviation (Hz) required for high energy.
    pub high_energy_pitch_std: f64,

    /// Mean RMS below which energy is low.
    pub low_energy_rms: f64,

    /// Filler word penalty variant.
    pub filler_penalty: FillerPenalty,

    /// Points deducted per long pause.
    pub long_pause_penalty: f64,

    /// Points awarded for each satisfied bonus condition.
    pub bonus_points: f64,

    /// Pitch standard deviation (Hz) above which the variation bonus applies.
    pub pitch_bonus_threshold: f64,

    /// Lowest score ever reported.
    ///
    /// Scores never look like a failure; this floor is part of the product.
    pub score_floor: f64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            pause_threshold_secs: 0.5,
            target_wpm: 150.0,
            wpm_tolerance: 20.0,
            high_energy_rms: 0.04,
            high_energy_pitch_std: 30.0,
            low_energy_rms: 0.015,
            filler_penalty: FillerPenalty::Standard,
            long_pause_penalty: 2.0,
            bonus_points: 5.0,
            pitch_bonus_threshold: 40.0,
            score_floor: 60.0,
        }
    }
}

impl AudioConfig {
    /// Builder-style setter for the long-pause threshold.
    pub fn with_pause_threshold(mut self, secs: f64) -> Self {
        self.pause_threshold_secs = secs.max(0.0);
        self
    }

    /// Builder-style setter for the target speaking rate.
    pub fn with_target_wpm(mut self, wpm: f64) -> Self {
        self.target_wpm = wpm.max(1.0);
        self
    }

    /// Builder-style setter for the filler penalty variant.
    pub fn with_filler_penalty(mut self, penalty: FillerPenalty) -> Self {
        self.filler_penalty = penalty;
        self
    }
}
