//! Composite score, rating and feedback models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Categorical rating derived from a 0-100 total score.
///
/// Thresholds are inclusive at the lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Rating {
    #[serde(rename = "Outstanding")]
    Outstanding,
    #[serde(rename = "Excellent")]
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Fair")]
    Fair,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl Rating {
    /// Rate a total score.
    pub fn from_score(total: f64) -> Self {
        if total >= 90.0 {
            Rating::Outstanding
        } else if total >= 80.0 {
            Rating::Excellent
        } else if total >= 70.0 {
            Rating::VeryGood
        } else if total >= 60.0 {
            Rating::Good
        } else if total >= 50.0 {
            Rating::Fair
        } else {
            Rating::NeedsImprovement
        }
    }

    /// Returns the rating as displayed to users.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Outstanding => "Outstanding",
            Rating::Excellent => "Excellent",
            Rating::VeryGood => "Very Good",
            Rating::Good => "Good",
            Rating::Fair => "Fair",
            Rating::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Generic composite score: named sub-scores, a total and its rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CompositeScore {
    /// Sub-score per dimension
    pub sub_scores: BTreeMap<String, f64>,
    /// Total score in [0, 100]
    pub total: f64,
    /// Rating of the total
    pub rating: Rating,
}

impl CompositeScore {
    /// Create a composite score, rating the total.
    pub fn new(sub_scores: BTreeMap<String, f64>, total: f64) -> Self {
        Self {
            sub_scores,
            total,
            rating: Rating::from_score(total),
        }
    }
}

/// The four video sub-scores, each in [0, 25].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DetailedScores {
    pub attention: f64,
    pub emotion: f64,
    pub posture: f64,
    pub engagement: f64,
}

impl DetailedScores {
    /// Sum of the four sub-scores.
    pub fn sum(&self) -> f64 {
        self.attention + self.emotion + self.posture + self.engagement
    }
}

/// Secondary presentation metrics reported next to the assessment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AssessmentMetrics {
    pub engagement_level: f64,
    pub expression_variety: f64,
    pub professionalism_score: f64,
    pub posture_quality: f64,
}

/// Video assessment block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Assessment {
    pub total_score: f64,
    pub detailed_scores: DetailedScores,
    pub rating: Rating,
    /// Positive feedback phrases
    pub feedback: Vec<String>,
    /// Improvement suggestions
    pub improvements: Vec<String>,
    pub metrics: AssessmentMetrics,
}

impl Assessment {
    /// View the assessment as a generic composite score.
    pub fn composite(&self) -> CompositeScore {
        let sub_scores = [
            ("attention", self.detailed_scores.attention),
            ("emotion", self.detailed_scores.emotion),
            ("posture", self.detailed_scores.posture),
            ("engagement", self.detailed_scores.engagement),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        CompositeScore {
            sub_scores,
            total: self.total_score,
            rating: self.rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_thresholds_inclusive() {
        assert_eq!(Rating::from_score(90.0), Rating::Outstanding);
        assert_eq!(Rating::from_score(89.9), Rating::Excellent);
        assert_eq!(Rating::from_score(80.0), Rating::Excellent);
        assert_eq!(Rating::from_score(70.0), Rating::VeryGood);
        assert_eq!(Rating::from_score(60.0), Rating::Good);
        assert_eq!(Rating::from_score(50.0), Rating::Fair);
        assert_eq!(Rating::from_score(49.9), Rating::NeedsImprovement);
    }

    #[test]
    fn test_rating_serializes_display_name() {
        let json = serde_json::to_string(&Rating::VeryGood).unwrap();
        assert_eq!(json, "\"Very Good\"");
        let json = serde_json::to_string(&Rating::NeedsImprovement).unwrap();
        assert_eq!(json, "\"Needs Improvement\"");
    }

    #[test]
    fn test_composite_view() {
        let assessment = Assessment {
            total_score: 70.0,
            detailed_scores: DetailedScores {
                attention: 25.0,
                emotion: 15.0,
                posture: 20.0,
                engagement: 10.0,
            },
            rating: Rating::VeryGood,
            feedback: vec![],
            improvements: vec![],
            metrics: AssessmentMetrics::default(),
        };
        let composite = assessment.composite();
        assert_eq!(composite.sub_scores.len(), 4);
        assert_eq!(composite.rating, Rating::VeryGood);
        assert!((composite.sub_scores["posture"] - 20.0).abs() < f64::EPSILON);
    }
}
