//! Composite scoring of a video run.
//!
//! A [`ScoringStrategy`] produces four 0-25 sub-scores; the
//! [`CompositeScorer`] sums them into a 0-100 total, rates it and attaches
//! rule-based feedback and secondary metrics.

pub mod feedback;
pub mod strategy;

use podium_models::{round_to, Assessment, AssessmentMetrics, Rating};
use tracing::debug;

use crate::config::ScoringMode;

pub use feedback::{feedback_for, phrase, Band, Dimension};
pub use strategy::{
    finalize_sub_score, seed_for, DeterministicStrategy, ScoringInputs, ScoringStrategy,
    SeededStrategy, StrategyScores, SUB_SCORE_MAX,
};

/// Build the strategy selected by the configuration.
///
/// `source_name` only matters for the seeded strategy.
pub fn strategy_for(mode: ScoringMode, source_name: &str) -> Box<dyn ScoringStrategy> {
    match mode {
        ScoringMode::Deterministic => Box::new(DeterministicStrategy),
        ScoringMode::Seeded => Box::new(SeededStrategy::from_source_name(source_name)),
    }
}

/// Turns strategy scores into the assessment block.
pub struct CompositeScorer {
    strategy: Box<dyn ScoringStrategy>,
}

impl CompositeScorer {
    pub fn new(strategy: Box<dyn ScoringStrategy>) -> Self {
        Self { strategy }
    }

    /// Scorer for a configured mode.
    pub fn for_mode(mode: ScoringMode, source_name: &str) -> Self {
        Self::new(strategy_for(mode, source_name))
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Score a run and build its assessment.
    pub fn assess(&self, inputs: &ScoringInputs<'_>) -> Assessment {
        let StrategyScores {
            detailed,
            professionalism,
        } = self.strategy.score(inputs);

        let total_score = round_to(detailed.sum(), 1).clamp(0.0, 100.0);
        let rating = Rating::from_score(total_score);
        let (feedback, improvements) = feedback_for(&detailed);

        let expression_variety = inputs.emotions.normalized().variance() * 100.0;

        debug!(
            strategy = self.strategy.name(),
            total_score,
            rating = %rating,
            "Composite score computed"
        );

        Assessment {
            total_score,
            detailed_scores: detailed,
            rating,
            feedback,
            improvements,
            metrics: AssessmentMetrics {
                engagement_level: round_to(detailed.engagement * 4.0, 1),
                expression_variety: round_to(expression_variety, 1),
                professionalism_score: round_to(professionalism, 1),
                posture_quality: round_to(detailed.posture / SUB_SCORE_MAX * 100.0, 1),
            },
        }
    }
}

impl Default for CompositeScorer {
    fn default() -> Self {
        Self::new(Box::new(DeterministicStrategy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podium_models::{EmotionLabel, EmotionVector, EngagementPatterns, EyeContactAnalysis};

    #[test]
    fn test_assessment_metrics() {
        let emotions = EmotionVector::new()
            .with(EmotionLabel::Happy, 0.5)
            .with(EmotionLabel::Neutral, 0.5);
        let eye = EyeContactAnalysis::from_counts(80, 20);
        let engagement = EngagementPatterns {
            segments: Vec::new(),
            overall_engagement: 0.8,
            engagement_stability: 100.0,
        };

        let assessment = CompositeScorer::default().assess(&ScoringInputs {
            emotions: &emotions,
            eye_contact: &eye,
            posture: None,
            engagement: &engagement,
        });

        assert!((assessment.detailed_scores.attention - 20.0).abs() < 1e-9);
        // 10·0.5 + 10·0.5 + 5
        assert!((assessment.detailed_scores.emotion - 15.0).abs() < 1e-9);
        // 15·0.8 + 10
        assert!((assessment.detailed_scores.engagement - 22.0).abs() < 1e-9);
        assert!((assessment.total_score - 57.0).abs() < 1e-9);
        assert_eq!(assessment.rating, Rating::Fair);

        assert!((assessment.metrics.engagement_level - 88.0).abs() < 1e-9);
        // variance of {0.5, 0.5}
        assert!(assessment.metrics.expression_variety.abs() < 1e-9);
        assert!(assessment.metrics.posture_quality.abs() < 1e-9);
        // (5/10)·60 + (1 − 5/5)·40
        assert!((assessment.metrics.professionalism_score - 30.0).abs() < 1e-9);

        assert_eq!(
            assessment.improvements,
            vec!["Focus on maintaining better posture".to_string()]
        );
        assert_eq!(assessment.feedback.len(), 3);
    }

    #[test]
    fn test_strategy_selection() {
        assert_eq!(
            CompositeScorer::for_mode(ScoringMode::Deterministic, "a.mp4").strategy_name(),
            "deterministic"
        );
        assert_eq!(
            CompositeScorer::for_mode(ScoringMode::Seeded, "a.mp4").strategy_name(),
            "seeded"
        );
    }

    #[test]
    fn test_seeded_scores_depend_on_name_only() {
        let emotions = EmotionVector::neutral_default();
        let eye = EyeContactAnalysis::from_counts(50, 50);
        let engagement = EngagementPatterns::default();
        let inputs = ScoringInputs {
            emotions: &emotions,
            eye_contact: &eye,
            posture: None,
            engagement: &engagement,
        };

        let a = CompositeScorer::for_mode(ScoringMode::Seeded, "/x/talk.mp4").assess(&inputs);
        let b = CompositeScorer::for_mode(ScoringMode::Seeded, "/y/talk.mp4").assess(&inputs);
        assert_eq!(a, b);
    }
}
