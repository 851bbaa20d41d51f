//! Running per-label emotion statistics.

use podium_models::{EmotionLabel, EmotionVector};
use std::collections::BTreeMap;

use crate::perception::Perception;

/// Emotion vector to record for a frame, if any.
///
/// A detected face without classifier output records the neutral default.
/// Frames without a face record nothing.
pub fn frame_emotion(perception: &Perception) -> Option<EmotionVector> {
    match (&perception.emotion, perception.has_face()) {
        (Some(vector), _) if !vector.is_empty() => Some(vector.clone()),
        (_, true) => Some(EmotionVector::neutral_default()),
        _ => None,
    }
}

/// Per-label running sums.
///
/// A label's mean covers only the frames that reported it; labels never
/// reported do not appear in [`averages`](Self::averages) at all.
#[derive(Debug, Clone, Default)]
pub struct EmotionAccumulator {
    sums: BTreeMap<EmotionLabel, (f64, u64)>,
    frames: u64,
}

impl EmotionAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every label weight of one frame's vector.
    pub fn record(&mut self, vector: &EmotionVector) {
        for (label, weight) in vector.iter() {
            let entry = self.sums.entry(label).or_insert((0.0, 0));
            entry.0 += weight;
            entry.1 += 1;
        }
        self.frames += 1;
    }

    /// Number of vectors recorded.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }

    /// Arithmetic mean per reported label.
    pub fn averages(&self) -> EmotionVector {
        self.sums
            .iter()
            .map(|(&label, &(sum, count))| {
                let mean = if count > 0 { sum / count as f64 } else { 0.0 };
                (label, mean)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_emotion_prefers_classifier_output() {
        let v = EmotionVector::new().with(EmotionLabel::Happy, 0.9);
        let p = Perception::face(Some(v.clone()));
        assert_eq!(frame_emotion(&p), Some(v));
    }

    #[test]
    fn test_frame_emotion_neutral_default() {
        let p = Perception::face(None);
        assert_eq!(frame_emotion(&p), Some(EmotionVector::neutral_default()));
    }

    #[test]
    fn test_frame_emotion_no_face() {
        assert_eq!(frame_emotion(&Perception::nothing()), None);
    }

    #[test]
    fn test_averages_exclude_missing_labels() {
        let mut acc = EmotionAccumulator::new();
        acc.record(&EmotionVector::new().with(EmotionLabel::Happy, 0.8));
        acc.record(
            &EmotionVector::new()
                .with(EmotionLabel::Happy, 0.4)
                .with(EmotionLabel::Sad, 0.6),
        );

        let avg = acc.averages();
        assert_eq!(acc.frames(), 2);
        assert!((avg.weight(EmotionLabel::Happy) - 0.6).abs() < 1e-9);
        // averaged over the one frame that reported it
        assert!((avg.weight(EmotionLabel::Sad) - 0.6).abs() < 1e-9);
        assert_eq!(avg.get(EmotionLabel::Neutral), None);
    }

    #[test]
    fn test_empty_accumulator() {
        let acc = EmotionAccumulator::new();
        assert!(acc.is_empty());
        assert!(acc.averages().is_empty());
    }
}
