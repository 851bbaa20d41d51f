//! Rule-based feedback phrases keyed by (dimension, band).

use podium_models::DetailedScores;

/// A scored dimension of the video assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Attention,
    Emotion,
    Posture,
    Engagement,
}

impl Dimension {
    /// Dimensions in report order.
    pub const ALL: &'static [Dimension] = &[
        Dimension::Attention,
        Dimension::Emotion,
        Dimension::Posture,
        Dimension::Engagement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Attention => "attention",
            Dimension::Emotion => "emotion",
            Dimension::Posture => "posture",
            Dimension::Engagement => "engagement",
        }
    }

    /// This dimension's points in a score set.
    pub fn points(&self, scores: &DetailedScores) -> f64 {
        match self {
            Dimension::Attention => scores.attention,
            Dimension::Emotion => scores.emotion,
            Dimension::Posture => scores.posture,
            Dimension::Engagement => scores.engagement,
        }
    }
}

/// Score band of a 0-25 sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    /// 20 points or more
    Strong,
    /// 15 points or more
    Solid,
    /// Below 15 points
    Weak,
}

impl Band {
    pub fn from_points(points: f64) -> Self {
        if points >= 20.0 {
            Band::Strong
        } else if points >= 15.0 {
            Band::Solid
        } else {
            Band::Weak
        }
    }

    /// Weak bands produce improvement suggestions instead of praise.
    pub fn is_improvement(&self) -> bool {
        matches!(self, Band::Weak)
    }
}

const FEEDBACK_TABLE: &[(Dimension, Band, &str)] = &[
    (Dimension::Attention, Band::Strong, "Excellent eye contact maintained throughout"),
    (Dimension::Attention, Band::Solid, "Good level of eye contact demonstrated"),
    (Dimension::Attention, Band::Weak, "Work on maintaining more consistent eye contact"),
    (Dimension::Emotion, Band::Strong, "Great emotional expression and engagement"),
    (Dimension::Emotion, Band::Solid, "Good emotional balance shown"),
    (Dimension::Emotion, Band::Weak, "Try to vary your emotional expression more"),
    (Dimension::Posture, Band::Strong, "Excellent posture maintained throughout"),
    (Dimension::Posture, Band::Solid, "Good posture demonstrated"),
    (Dimension::Posture, Band::Weak, "Focus on maintaining better posture"),
    (Dimension::Engagement, Band::Strong, "Outstanding engagement level"),
    (Dimension::Engagement, Band::Solid, "Good engagement maintained"),
    (Dimension::Engagement, Band::Weak, "Work on improving overall engagement"),
];

/// Phrase for a dimension in a band.
pub fn phrase(dimension: Dimension, band: Band) -> &'static str {
    FEEDBACK_TABLE
        .iter()
        .find(|(d, b, _)| *d == dimension && *b == band)
        .map(|(_, _, text)| *text)
        .unwrap_or_default()
}

/// Split the phrases for a score set into `(feedback, improvements)`.
pub fn feedback_for(scores: &DetailedScores) -> (Vec<String>, Vec<String>) {
    let mut feedback = Vec::new();
    let mut improvements = Vec::new();

    for &dimension in Dimension::ALL {
        let band = Band::from_points(dimension.points(scores));
        let text = phrase(dimension, band).to_string();
        if band.is_improvement() {
            improvements.push(text);
        } else {
            feedback.push(text);
        }
    }

    (feedback, improvements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_complete() {
        for &dimension in Dimension::ALL {
            for band in [Band::Strong, Band::Solid, Band::Weak] {
                assert!(!phrase(dimension, band).is_empty());
            }
        }
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(Band::from_points(20.0), Band::Strong);
        assert_eq!(Band::from_points(19.9), Band::Solid);
        assert_eq!(Band::from_points(15.0), Band::Solid);
        assert_eq!(Band::from_points(14.9), Band::Weak);
    }

    #[test]
    fn test_feedback_split() {
        let scores = DetailedScores {
            attention: 25.0,
            emotion: 16.0,
            posture: 3.0,
            engagement: 10.0,
        };
        let (feedback, improvements) = feedback_for(&scores);
        assert_eq!(
            feedback,
            vec![
                "Excellent eye contact maintained throughout".to_string(),
                "Good emotional balance shown".to_string(),
            ]
        );
        assert_eq!(
            improvements,
            vec![
                "Focus on maintaining better posture".to_string(),
                "Work on improving overall engagement".to_string(),
            ]
        );
    }
}
