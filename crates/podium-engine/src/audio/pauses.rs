//! Pause classification between voiced intervals.

use podium_models::{round_to, PauseAnalysis};

/// Classify the gaps between consecutive voiced intervals.
///
/// A gap longer than `threshold_secs` is a long pause; every other gap
/// (including back-to-back intervals) is a short pause. Overlapping
/// intervals count as a zero-length gap.
pub fn analyze_pauses(voiced_intervals: &[(f64, f64)], threshold_secs: f64) -> PauseAnalysis {
    let mut analysis = PauseAnalysis::default();
    let mut long_total = 0.0;
    let mut short_total = 0.0;

    for pair in voiced_intervals.windows(2) {
        let (_, prev_end) = pair[0];
        let (curr_start, _) = pair[1];
        let gap = (curr_start - prev_end).max(0.0);

        if gap > threshold_secs {
            analysis.long_pauses += 1;
            long_total += gap;
        } else {
            analysis.short_pauses += 1;
            short_total += gap;
        }
    }

    analysis.total_long_duration = round_to(long_total, 2);
    analysis.total_short_duration = round_to(short_total, 2);
    analysis
}

/// Rule-based pause feedback.
pub fn pause_feedback(analysis: &PauseAnalysis) -> &'static str {
    if analysis.long_pauses > 5 {
        "Consider reducing long pauses to maintain flow."
    } else if analysis.short_pauses < 3 {
        "You might benefit from a few well-placed pauses for clarity."
    } else {
        "Good pacing detected."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_gaps() {
        let intervals = [(0.0, 1.0), (1.2, 2.0), (3.0, 4.0), (4.5, 5.0)];
        let analysis = analyze_pauses(&intervals, 0.5);
        // gaps 0.2, 1.0, 0.5 (exactly at threshold is short)
        assert_eq!(analysis.long_pauses, 1);
        assert_eq!(analysis.short_pauses, 2);
        assert!((analysis.total_long_duration - 1.0).abs() < 1e-9);
        assert!((analysis.total_short_duration - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_single_interval_has_no_pauses() {
        let analysis = analyze_pauses(&[(0.0, 3.0)], 0.5);
        assert_eq!(analysis, PauseAnalysis::default());
    }

    #[test]
    fn test_feedback_rules() {
        let many_long = PauseAnalysis {
            long_pauses: 6,
            ..PauseAnalysis::default()
        };
        assert_eq!(
            pause_feedback(&many_long),
            "Consider reducing long pauses to maintain flow."
        );

        let few_short = PauseAnalysis {
            short_pauses: 2,
            ..PauseAnalysis::default()
        };
        assert_eq!(
            pause_feedback(&few_short),
            "You might benefit from a few well-placed pauses for clarity."
        );

        let balanced = PauseAnalysis {
            long_pauses: 2,
            short_pauses: 8,
            ..PauseAnalysis::default()
        };
        assert_eq!(pause_feedback(&balanced), "Good pacing detected.");
    }
}
