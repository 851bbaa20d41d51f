//! Named composite scoring strategies.
//!
//! Each strategy turns the run aggregates into four 0-25 sub-scores and a
//! professionalism metric. Clamping and rounding are shared: every sub-score
//! is clamped to [0, 25] and rounded to 1 decimal.

use podium_models::{
    round_to, DetailedScores, EmotionLabel, EmotionVector, EngagementPatterns,
    EyeContactAnalysis, PostureAnalysis,
};
use md5::{Digest, Md5};
use std::path::Path;

/// Budget of each sub-score.
pub const SUB_SCORE_MAX: f64 = 25.0;

/// Run aggregates consumed by a scoring strategy.
#[derive(Debug, Clone, Copy)]
pub struct ScoringInputs<'a> {
    /// Per-label emotion means (not yet normalized)
    pub emotions: &'a EmotionVector,
    pub eye_contact: &'a EyeContactAnalysis,
    pub posture: Option<&'a PostureAnalysis>,
    pub engagement: &'a EngagementPatterns,
}

/// Output of a scoring strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StrategyScores {
    /// Clamped, rounded sub-scores
    pub detailed: DetailedScores,
    /// Unrounded professionalism metric
    pub professionalism: f64,
}

/// A composite scoring formula.
pub trait ScoringStrategy: Send + Sync {
    fn score(&self, inputs: &ScoringInputs<'_>) -> StrategyScores;

    /// Strategy name for logging.
    fn name(&self) -> &'static str;
}

/// Clamp a sub-score to its budget and round it to 1 decimal.
pub fn finalize_sub_score(points: f64) -> f64 {
    round_to(points.clamp(0.0, SUB_SCORE_MAX), 1)
}

/// Content-driven scoring: the same inputs always give the same scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicStrategy;

impl ScoringStrategy for DeterministicStrategy {
    fn score(&self, inputs: &ScoringInputs<'_>) -> StrategyScores {
        let emotions = inputs.emotions.normalized();

        let attention = inputs.eye_contact.attention_percentage / 100.0 * 25.0;

        let positive_points = emotions.sum_of(EmotionLabel::POSITIVE) * 10.0;
        let neutral_points = emotions.weight(EmotionLabel::Neutral) * 10.0;
        let negative_points = (1.0 - emotions.sum_of(EmotionLabel::NEGATIVE)) * 5.0;
        let emotion = positive_points + neutral_points + negative_points;

        let posture = inputs
            .posture
            .map(|p| p.overall_posture_score * 0.25)
            .unwrap_or(0.0);

        let engagement = inputs.engagement.overall_engagement * 15.0
            + inputs.engagement.engagement_stability / 100.0 * 10.0;

        StrategyScores {
            detailed: DetailedScores {
                attention: finalize_sub_score(attention),
                emotion: finalize_sub_score(emotion),
                posture: finalize_sub_score(posture),
                engagement: finalize_sub_score(engagement),
            },
            professionalism: (neutral_points / 10.0) * 60.0
                + (1.0 - negative_points / 5.0) * 40.0,
        }
    }

    fn name(&self) -> &'static str {
        "deterministic"
    }
}

/// Seeded per-file scoring: the factors depend on the source file name.
///
/// Identical recordings under different names get different scores. The
/// factor is `base + (seed mod 16) / 100` with the seed taken from the MD5
/// digest of the base name.
#[derive(Debug, Clone, Copy)]
pub struct SeededStrategy {
    seed: u64,
}

impl SeededStrategy {
    pub fn new(seed: u64) -> Self {
        Self { seed: seed % 100 }
    }

    /// Seed from the base name of a source path.
    pub fn from_source_name(source_name: &str) -> Self {
        Self::new(seed_for(source_name))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Factor increment shared by all four sub-scores.
    pub fn step(&self) -> f64 {
        (self.seed % 16) as f64 / 100.0
    }
}

/// MD5 of the base name, read as a big-endian integer, mod 100.
pub fn seed_for(source_name: &str) -> u64 {
    let base = Path::new(source_name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source_name.to_string());

    Md5::digest(base.as_bytes())
        .iter()
        .fold(0u64, |acc, &byte| (acc * 256 + byte as u64) % 100)
}

impl ScoringStrategy for SeededStrategy {
    fn score(&self, inputs: &ScoringInputs<'_>) -> StrategyScores {
        let step = self.step();
        let emotions = inputs.emotions.normalized();

        let attention = (0.70 + step) * (inputs.eye_contact.attention_percentage / 100.0) * 25.0;

        let emotion_sum =
            emotions.sum_of(EmotionLabel::POSITIVE) + emotions.weight(EmotionLabel::Neutral);
        let emotion = (0.75 + step) * emotion_sum * 25.0;

        let posture = inputs
            .posture
            .map(|p| (0.80 + step) * (p.overall_posture_score / 100.0) * 25.0)
            .unwrap_or(0.0);

        let engagement =
            (0.70 + step) * (inputs.engagement.overall_engagement / 100.0) * 25.0;

        let negative_sum = emotions.sum_of(EmotionLabel::NEGATIVE);

        StrategyScores {
            detailed: DetailedScores {
                attention: finalize_sub_score(attention),
                emotion: finalize_sub_score(emotion),
                posture: finalize_sub_score(posture),
                engagement: finalize_sub_score(engagement),
            },
            professionalism: emotion_sum * 60.0 + (1.0 - negative_sum) * 40.0,
        }
    }

    fn name(&self) -> &'static str {
        "seeded"
    }
}
