//! Filler word counting.

use podium_models::FillerWordAnalysis;
use std::collections::BTreeMap;

/// Filler vocabulary.
///
/// Matching is against single whitespace tokens, so the two-word entries
/// never match.
pub const FILLER_WORDS: &[&str] = &[
    "um", "uh", "umm", "you know", "like", "actually", "basically", "so", "i mean", "right",
    "well", "okay", "hmm",
];

/// Count filler words in a transcript.
///
/// The transcript is lowercased and split on whitespace; punctuation stays
/// attached, so `"so,"` is not a filler.
pub fn analyze_fillers(transcript: &str) -> FillerWordAnalysis {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();

    for token in transcript.to_lowercase().split_whitespace() {
        if FILLER_WORDS.contains(&token) {
            *counts.entry(token.to_string()).or_insert(0) += 1;
        }
    }

    FillerWordAnalysis {
        total_fillers: counts.values().sum(),
        counts,
    }
}

/// Rule-based filler feedback.
pub fn filler_feedback(analysis: &FillerWordAnalysis) -> String {
    if analysis.total_fillers == 0 {
        return "No filler words detected. Great clarity!".to_string();
    }

    let breakdown: Vec<String> = analysis
        .counts
        .iter()
        .map(|(word, count)| format!("'{word}': {count} time(s)"))
        .collect();

    format!(
        "Total Filler Words: {} ({}). Try replacing fillers with a short pause.",
        analysis.total_fillers,
        breakdown.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_exact_tokens() {
        let analysis = analyze_fillers("Um I think um this is like great Like");
        assert_eq!(analysis.total_fillers, 4);
        assert_eq!(analysis.counts["um"], 2);
        assert_eq!(analysis.counts["like"], 2);
    }

    #[test]
    fn test_punctuation_blocks_match() {
        let analysis = analyze_fillers("So, um, right?");
        assert_eq!(analysis.total_fillers, 0);
    }

    #[test]
    fn test_multi_word_entries_never_match() {
        let analysis = analyze_fillers("you know i mean");
        assert_eq!(analysis.total_fillers, 0);
    }

    #[test]
    fn test_feedback() {
        assert_eq!(
            filler_feedback(&analyze_fillers("clear speech")),
            "No filler words detected. Great clarity!"
        );
        let text = filler_feedback(&analyze_fillers("uh uh okay"));
        assert!(text.starts_with("Total Filler Words: 3"));
        assert!(text.contains("'uh': 2 time(s)"));
    }
}
