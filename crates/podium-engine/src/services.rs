//! Hosted text-generation collaborators.
//!
//! Both services are optional and non-fatal. A failure is logged and the
//! corresponding output falls back: the paraphrase becomes null and coaching
//! feedback keeps its rule-based text.

use podium_models::{AudioFeedback, Paraphrase};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

use crate::error::{EngineError, EngineResult};

/// Maximum number of paraphrase options kept.
pub const MAX_PARAPHRASE_OPTIONS: usize = 5;

/// Produces alternative phrasings of a transcript.
pub trait Paraphraser: Send + Sync {
    /// Raw model output, one phrasing per line or a paragraph of sentences.
    fn paraphrase(&self, text: &str) -> EngineResult<String>;

    fn name(&self) -> &'static str;
}

/// Writes coaching feedback from an analysis summary.
pub trait FeedbackWriter: Send + Sync {
    /// Raw model output that contains a JSON object with per-section feedback.
    fn write_feedback(&self, analysis: &serde_json::Value) -> EngineResult<String>;

    fn name(&self) -> &'static str;
}

fn bullet_split() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\n•*]+\s*").expect("valid regex"))
}

fn sentence_split() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\.\s+").expect("valid regex"))
}

fn json_object() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"))
}

/// Turn raw paraphrase output into at most five options.
///
/// Lines are split on newlines and bullet characters. A single paragraph
/// with five or more periods is split into sentences instead. Returns `None`
/// when nothing usable remains.
pub fn format_paraphrase(raw: &str) -> Option<Paraphrase> {
    let mut lines: Vec<String> = bullet_split()
        .split(raw.trim())
        .map(|line| line.trim_matches(|c: char| c == '-' || c == '•' || c == '*' || c.is_whitespace()))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if lines.len() == 1 && lines[0].matches('.').count() >= 5 {
        lines = sentence_split()
            .split(&lines[0])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                let s = s.trim_end_matches('.');
                format!("{s}.")
            })
            .collect();
    }

    lines.truncate(MAX_PARAPHRASE_OPTIONS);
    if lines.is_empty() {
        return None;
    }
    Some(Paraphrase::from_options(lines))
}

/// Sections a feedback writer may fill in. Missing sections keep their
/// rule-based text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneratedFeedback {
    #[serde(default)]
    pub transcription_feedback: Option<String>,
    #[serde(default)]
    pub filler_feedback: Option<String>,
    #[serde(default)]
    pub pause_feedback: Option<String>,
    #[serde(default)]
    pub speed_feedback: Option<String>,
    #[serde(default)]
    pub energy_feedback: Option<String>,
    #[serde(default)]
    pub pitch_feedback: Option<String>,
}

impl GeneratedFeedback {
    /// Extract the first `{...}` block from raw model output.
    pub fn parse(raw: &str) -> EngineResult<Self> {
        let block = json_object()
            .find(raw)
            .ok_or_else(|| EngineError::external_service("feedback", "no JSON object in response"))?;
        serde_json::from_str(block.as_str())
            .map_err(|e| EngineError::external_service("feedback", e.to_string()))
    }

    /// Overlay non-empty generated sections on rule-based feedback.
    pub fn merge_into(self, base: AudioFeedback) -> AudioFeedback {
        fn pick(generated: Option<String>, fallback: String) -> String {
            generated
                .filter(|text| !text.trim().is_empty())
                .unwrap_or(fallback)
        }

        AudioFeedback {
            transcription_feedback: pick(self.transcription_feedback, base.transcription_feedback),
            filler_feedback: pick(self.filler_feedback, base.filler_feedback),
            pause_feedback: pick(self.pause_feedback, base.pause_feedback),
            speed_feedback: pick(self.speed_feedback, base.speed_feedback),
            energy_feedback: pick(self.energy_feedback, base.energy_feedback),
            pitch_feedback: pick(self.pitch_feedback, base.pitch_feedback),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podium_models::ParaphraseKind;

    #[test]
    fn test_paraphrase_lines() {
        let raw = "First way.\n• Second way.\n* Third way.\n\n- Fourth way.";
        let p = format_paraphrase(raw).unwrap();
        assert_eq!(p.kind, ParaphraseKind::List);
        assert_eq!(
            p.options,
            vec!["First way.", "Second way.", "Third way.", "Fourth way."]
        );
    }

    #[test]
    fn test_paraphrase_paragraph_split() {
        let raw = "One. Two. Three. Four. Five. Six.";
        let p = format_paraphrase(raw).unwrap();
        assert_eq!(p.options.len(), MAX_PARAPHRASE_OPTIONS);
        assert_eq!(p.options[0], "One.");
        assert_eq!(p.options[4], "Five.");
    }

    #[test]
    fn test_paraphrase_single_and_empty() {
        let p = format_paraphrase("Just one rewrite.").unwrap();
        assert_eq!(p.kind, ParaphraseKind::Single);
        assert!(format_paraphrase("  \n * ").is_none());
    }

    #[test]
    fn test_generated_feedback_parse_and_merge() {
        let raw = "Sure! Here you go:\n{\"pause_feedback\": \"Pause less.\", \"speed_feedback\": \"\"}\nThanks";
        let generated = GeneratedFeedback::parse(raw).unwrap();

        let base = AudioFeedback {
            pause_feedback: "rule pause".to_string(),
            speed_feedback: "rule speed".to_string(),
            ..AudioFeedback::default()
        };
        let merged = generated.merge_into(base);
        assert_eq!(merged.pause_feedback, "Pause less.");
        assert_eq!(merged.speed_feedback, "rule speed");
    }

    #[test]
    fn test_generated_feedback_without_json() {
        let err = GeneratedFeedback::parse("no structure here").unwrap_err();
        assert!(!err.is_fatal());
    }
}
