//! Audio analysis result models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::assessment::CompositeScore;

/// Filler word usage in the transcript.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FillerWordAnalysis {
    pub total_fillers: u64,
    /// Occurrences per matched filler word
    pub counts: BTreeMap<String, u64>,
}

/// Gaps between voiced intervals, split at the long-pause threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PauseAnalysis {
    pub long_pauses: u64,
    pub short_pauses: u64,
    /// Seconds, rounded to 2 decimals
    pub total_long_duration: f64,
    /// Seconds, rounded to 2 decimals
    pub total_short_duration: f64,
}

/// Speaking rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpeechSpeed {
    /// Words per minute, rounded to 2 decimals
    pub wpm: f64,
    /// Audio duration in seconds, rounded to 2 decimals
    pub duration_sec: f64,
    pub feedback: String,
}

/// Vocal energy classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum EnergyLevel {
    #[serde(rename = "High Energy")]
    High,
    #[serde(rename = "Moderate Energy")]
    Moderate,
    #[serde(rename = "Low Energy")]
    Low,
}

impl EnergyLevel {
    /// Returns the label as displayed to users.
    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyLevel::High => "High Energy",
            EnergyLevel::Moderate => "Moderate Energy",
            EnergyLevel::Low => "Low Energy",
        }
    }

    /// True for the levels that earn the energy bonus.
    pub fn is_engaging(&self) -> bool {
        matches!(self, EnergyLevel::High | EnergyLevel::Moderate)
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Loudness and pitch variation summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EnergyAnalysis {
    /// Mean RMS energy
    pub avg_rms: f64,
    /// Standard deviation of voiced pitch in Hz
    pub pitch_variation: f64,
    pub energy_level: EnergyLevel,
}

/// Voiced pitch statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PitchAnalysis {
    pub average_pitch: f64,
    pub pitch_variation: f64,
    pub min_pitch: f64,
    pub max_pitch: f64,
    /// Share of pitch frames that were voiced, 0-1
    pub voiced_ratio: f64,
}

/// Shape of a paraphrase response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ParaphraseKind {
    List,
    Single,
}

/// Alternative phrasings of the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Paraphrase {
    #[serde(rename = "type")]
    pub kind: ParaphraseKind,
    pub options: Vec<String>,
}

impl Paraphrase {
    /// Wrap options, marking a single option as `single`.
    pub fn from_options(options: Vec<String>) -> Self {
        let kind = if options.len() > 1 {
            ParaphraseKind::List
        } else {
            ParaphraseKind::Single
        };
        Self { kind, options }
    }
}

/// Per-section coaching feedback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AudioFeedback {
    pub transcription_feedback: String,
    pub filler_feedback: String,
    pub pause_feedback: String,
    pub speed_feedback: String,
    pub energy_feedback: String,
    pub pitch_feedback: String,
}

/// Complete result of one audio pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AudioAnalysisResult {
    /// Null when the transcription service failed
    pub transcription: Option<String>,
    #[serde(rename = "fillerWords")]
    pub filler_words: FillerWordAnalysis,
    pub pauses: PauseAnalysis,
    pub speed: SpeechSpeed,
    pub energy: EnergyAnalysis,
    pub pitch: PitchAnalysis,
    /// Null when no paraphraser is configured or it failed
    pub paraphrase: Option<Paraphrase>,
    #[serde(rename = "overallScore")]
    pub overall_score: f64,
    #[serde(rename = "scoreBreakdown")]
    pub score_breakdown: CompositeScore,
    #[serde(rename = "overallFeedback")]
    pub overall_feedback: AudioFeedback,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_energy_level_names() {
        assert_eq!(
            serde_json::to_string(&EnergyLevel::Moderate).unwrap(),
            "\"Moderate Energy\""
        );
        assert!(EnergyLevel::High.is_engaging());
        assert!(!EnergyLevel::Low.is_engaging());
    }

    #[test]
    fn test_paraphrase_kind() {
        let single = Paraphrase::from_options(vec!["One way.".to_string()]);
        assert_eq!(single.kind, ParaphraseKind::Single);

        let list = Paraphrase::from_options(vec!["A.".to_string(), "B.".to_string()]);
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["type"], "list");
    }
}
