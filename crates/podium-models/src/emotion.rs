//! Emotion label set and per-frame emotion vectors.
//!
//! The classifier collaborator reports a probability-like weight for each
//! label in a fixed set. Vectors need not sum to 1 when ingested; they are
//! normalized only when the composite score is computed.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Emotion label reported by the facial expression classifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EmotionLabel {
    Angry,
    Disgust,
    Fear,
    Happy,
    Sad,
    Surprise,
    Neutral,
}

impl EmotionLabel {
    /// All labels, in classifier output order.
    pub const ALL: &'static [EmotionLabel] = &[
        EmotionLabel::Angry,
        EmotionLabel::Disgust,
        EmotionLabel::Fear,
        EmotionLabel::Happy,
        EmotionLabel::Sad,
        EmotionLabel::Surprise,
        EmotionLabel::Neutral,
    ];

    /// Labels counted as positive expression.
    pub const POSITIVE: &'static [EmotionLabel] = &[EmotionLabel::Happy, EmotionLabel::Surprise];

    /// Labels counted as negative expression.
    pub const NEGATIVE: &'static [EmotionLabel] = &[
        EmotionLabel::Angry,
        EmotionLabel::Sad,
        EmotionLabel::Fear,
        EmotionLabel::Disgust,
    ];

    /// Returns the label name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionLabel::Angry => "angry",
            EmotionLabel::Disgust => "disgust",
            EmotionLabel::Fear => "fear",
            EmotionLabel::Happy => "happy",
            EmotionLabel::Sad => "sad",
            EmotionLabel::Surprise => "surprise",
            EmotionLabel::Neutral => "neutral",
        }
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EmotionLabel {
    type Err = EmotionLabelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "angry" => Ok(EmotionLabel::Angry),
            "disgust" => Ok(EmotionLabel::Disgust),
            "fear" => Ok(EmotionLabel::Fear),
            "happy" => Ok(EmotionLabel::Happy),
            "sad" => Ok(EmotionLabel::Sad),
            "surprise" => Ok(EmotionLabel::Surprise),
            "neutral" => Ok(EmotionLabel::Neutral),
            _ => Err(EmotionLabelParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown emotion label: {0}")]
pub struct EmotionLabelParseError(String);

/// Emotion weights for one frame (or an aggregate over many frames).
///
/// Labels absent from the map were never reported; they are not the same as
/// a reported weight of zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct EmotionVector(BTreeMap<EmotionLabel, f64>);

impl EmotionVector {
    /// Create an empty vector.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Vector recorded when a face was found but the classifier produced no
    /// probabilities: every label 0 except neutral at 1.0.
    pub fn neutral_default() -> Self {
        EmotionLabel::ALL
            .iter()
            .map(|&label| {
                let weight = if label == EmotionLabel::Neutral { 1.0 } else { 0.0 };
                (label, weight)
            })
            .collect()
    }

    /// Builder-style setter for a single label.
    pub fn with(mut self, label: EmotionLabel, weight: f64) -> Self {
        self.0.insert(label, weight);
        self
    }

    /// Set the weight of a label.
    pub fn insert(&mut self, label: EmotionLabel, weight: f64) {
        self.0.insert(label, weight);
    }

    /// Weight of a label, if it was reported.
    pub fn get(&self, label: EmotionLabel) -> Option<f64> {
        self.0.get(&label).copied()
    }

    /// Weight of a label, treating unreported labels as 0.
    pub fn weight(&self, label: EmotionLabel) -> f64 {
        self.get(label).unwrap_or(0.0)
    }

    /// Sum of weights over a label group, treating unreported labels as 0.
    pub fn sum_of(&self, labels: &[EmotionLabel]) -> f64 {
        labels.iter().map(|&l| self.weight(l)).sum()
    }

    /// Sum of all reported weights.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Iterate over reported `(label, weight)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (EmotionLabel, f64)> + '_ {
        self.0.iter().map(|(label, weight)| (*label, *weight))
    }

    /// Number of reported labels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no label was reported.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Normalize the vector to fractions of its total.
    ///
    /// A vector with a non-positive total keeps its reported labels at 0 and
    /// becomes fully neutral.
    pub fn normalized(&self) -> EmotionVector {
        let total = self.total();
        if total > 0.0 {
            self.iter().map(|(label, w)| (label, w / total)).collect()
        } else {
            let mut zeroed: EmotionVector = self.iter().map(|(label, _)| (label, 0.0)).collect();
            zeroed.insert(EmotionLabel::Neutral, 1.0);
            zeroed
        }
    }

    /// Population variance of the reported weights.
    pub fn variance(&self) -> f64 {
        if self.0.is_empty() {
            return 0.0;
        }
        let n = self.0.len() as f64;
        let mean = self.total() / n;
        self.0.values().map(|w| (w - mean).powi(2)).sum::<f64>() / n
    }
}

impl FromIterator<(EmotionLabel, f64)> for EmotionVector {
    fn from_iter<I: IntoIterator<Item = (EmotionLabel, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_default_covers_all_labels() {
        let v = EmotionVector::neutral_default();
        assert_eq!(v.len(), EmotionLabel::ALL.len());
        assert!((v.weight(EmotionLabel::Neutral) - 1.0).abs() < f64::EPSILON);
        assert!(v.weight(EmotionLabel::Happy).abs() < f64::EPSILON);
    }

    #[test]
    fn test_normalized_sums_to_one() {
        let v = EmotionVector::new()
            .with(EmotionLabel::Happy, 0.6)
            .with(EmotionLabel::Neutral, 1.4);
        let n = v.normalized();
        assert!((n.total() - 1.0).abs() < 1e-9);
        assert!((n.weight(EmotionLabel::Happy) - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_normalized_zero_total_is_neutral() {
        let v = EmotionVector::new().with(EmotionLabel::Sad, 0.0);
        let n = v.normalized();
        assert!((n.weight(EmotionLabel::Neutral) - 1.0).abs() < f64::EPSILON);
        assert_eq!(n.get(EmotionLabel::Sad), Some(0.0));
    }

    #[test]
    fn test_serializes_as_label_map() {
        let v = EmotionVector::new().with(EmotionLabel::Surprise, 0.25);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"surprise":0.25}"#);

        let back: EmotionVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_label_from_str() {
        assert_eq!("Happy".parse::<EmotionLabel>().unwrap(), EmotionLabel::Happy);
        assert!("bored".parse::<EmotionLabel>().is_err());
    }
}
