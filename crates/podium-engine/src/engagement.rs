//! Engagement and attention aggregation over a whole run.

use podium_models::{EngagementPatterns, EyeContactAnalysis, SegmentSummary};

use crate::error::{EngineError, EngineResult};

/// Summarize closed segments.
///
/// `overall_engagement` is the mean segment engagement and
/// `engagement_stability` is `100 − 10·σ` (population standard deviation).
/// Both are 0 when no segment was closed.
pub fn aggregate(segments: Vec<SegmentSummary>) -> EngagementPatterns {
    if segments.is_empty() {
        return EngagementPatterns::default();
    }

    let n = segments.len() as f64;
    let mean = segments.iter().map(|s| s.engagement).sum::<f64>() / n;
    let variance = segments
        .iter()
        .map(|s| (s.engagement - mean).powi(2))
        .sum::<f64>()
        / n;

    EngagementPatterns {
        overall_engagement: mean,
        engagement_stability: 100.0 - variance.sqrt() * 10.0,
        segments,
    }
}

/// Attentive and inattentive sample counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttentionTally {
    pub attentive: u64,
    pub inattentive: u64,
    /// Samples in which any face was found.
    pub with_face: u64,
}

impl AttentionTally {
    pub fn record(&mut self, attentive: bool, face: bool) {
        if attentive {
            self.attentive += 1;
        } else {
            self.inattentive += 1;
        }
        if face {
            self.with_face += 1;
        }
    }

    /// Total samples counted either way.
    pub fn total(&self) -> u64 {
        self.attentive + self.inattentive
    }

    /// Eye contact block.
    ///
    /// Fails with `NoSignalDetected` when no sample was counted or no sample
    /// ever contained a face.
    pub fn eye_contact(&self) -> EngineResult<EyeContactAnalysis> {
        if self.total() == 0 || self.with_face == 0 {
            return Err(EngineError::NoSignalDetected);
        }
        Ok(EyeContactAnalysis::from_counts(self.attentive, self.inattentive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podium_models::EmotionVector;

    fn segment(time: f64, engagement: f64) -> SegmentSummary {
        SegmentSummary {
            time,
            emotions: EmotionVector::new(),
            engagement,
        }
    }

    #[test]
    fn test_empty_segments() {
        let patterns = aggregate(Vec::new());
        assert!(patterns.overall_engagement.abs() < f64::EPSILON);
        assert!(patterns.engagement_stability.abs() < f64::EPSILON);
    }

    #[test]
    fn test_mean_and_stability() {
        let patterns = aggregate(vec![segment(0.0, 0.4), segment(10.0, 0.8)]);
        assert!((patterns.overall_engagement - 0.6).abs() < 1e-9);
        // σ = 0.2
        assert!((patterns.engagement_stability - 98.0).abs() < 1e-9);
        assert_eq!(patterns.segments.len(), 2);
    }

    #[test]
    fn test_constant_engagement_is_fully_stable() {
        let patterns = aggregate(vec![segment(0.0, 1.0); 3]);
        assert!((patterns.engagement_stability - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_tally_without_samples_is_no_signal() {
        let tally = AttentionTally::default();
        assert!(matches!(tally.eye_contact(), Err(EngineError::NoSignalDetected)));
    }

    #[test]
    fn test_tally_without_faces_is_no_signal() {
        let mut tally = AttentionTally::default();
        tally.record(false, false);
        tally.record(false, false);
        assert_eq!(tally.total(), 2);
        assert!(matches!(tally.eye_contact(), Err(EngineError::NoSignalDetected)));
    }

    #[test]
    fn test_tally_faces_looking_away() {
        let mut tally = AttentionTally::default();
        tally.record(false, true);
        tally.record(true, true);
        tally.record(false, false);
        let eye = tally.eye_contact().unwrap();
        assert_eq!(eye.looking_at_screen, 1);
        assert_eq!(eye.not_looking_at_screen, 2);
        assert!((eye.attention_percentage - 100.0 / 3.0).abs() < 1e-9);
    }
}
