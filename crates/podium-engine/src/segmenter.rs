//! Fixed-window bucketing of sampled frames into engagement segments.
//!
//! # Flush rule
//!
//! ```text
//!   sample at t ──► t − start ≥ window ? ──yes──► close segment [start, t)
//!                         │                        open new segment at t
//!                         no                               │
//!                         ▼                                ▼
//!                  add sample to the open segment ◄────────┘
//! ```
//!
//! The check runs before the triggering sample is added, so that sample
//! belongs to the new segment. Segments are measured on the timestamps of
//! sampled frames, never on rounded window boundaries.

use podium_models::{EmotionVector, SegmentSummary};
use tracing::debug;

use crate::emotion::EmotionAccumulator;
use crate::metrics;

/// The segment currently receiving samples.
#[derive(Debug, Clone)]
struct OpenSegment {
    start_time: f64,
    emotions: EmotionAccumulator,
    engagement_count: u64,
    samples: u64,
}

impl OpenSegment {
    fn starting_at(start_time: f64) -> Self {
        Self {
            start_time,
            emotions: EmotionAccumulator::new(),
            engagement_count: 0,
            samples: 0,
        }
    }
}

/// Buckets sampled frames into fixed-duration segments.
#[derive(Debug, Clone)]
pub struct TemporalSegmenter {
    window_secs: f64,
    /// Expected samples per full window: `window · fps / stride`.
    expected_samples: f64,
    open: OpenSegment,
    closed: Vec<SegmentSummary>,
}

impl TemporalSegmenter {
    /// Create a segmenter for a stream sampled every `stride` frames.
    pub fn new(window_secs: f64, fps: f64, stride: u64) -> Self {
        Self {
            window_secs,
            expected_samples: window_secs * fps / stride.max(1) as f64,
            open: OpenSegment::starting_at(0.0),
            closed: Vec::new(),
        }
    }

    /// Add one sampled frame. Returns true when the frame closed a segment.
    pub fn ingest(&mut self, timestamp: f64, attentive: bool, emotion: Option<&EmotionVector>) -> bool {
        let flushed = timestamp - self.open.start_time >= self.window_secs;
        if flushed {
            self.flush(timestamp, false);
        }

        let segment = &mut self.open;
        segment.samples += 1;
        if attentive {
            segment.engagement_count += 1;
        }
        if let Some(vector) = emotion {
            segment.emotions.record(vector);
        }

        flushed
    }

    /// Segments closed so far.
    pub fn segments(&self) -> &[SegmentSummary] {
        &self.closed
    }

    /// Finish the stream and return every closed segment.
    ///
    /// The trailing partial segment is flushed only when `flush_final` is set
    /// and it received at least one sample. It uses the full-window
    /// denominator, so its engagement is proportionally smaller.
    pub fn finish(mut self, flush_final: bool) -> Vec<SegmentSummary> {
        if flush_final && self.open.samples > 0 {
            let end = self.open.start_time;
            self.flush(end, true);
        } else if self.open.samples > 0 {
            debug!(
                start_time = self.open.start_time,
                samples = self.open.samples,
                "Dropping trailing partial segment"
            );
        }
        self.closed
    }

    fn flush(&mut self, next_start: f64, final_segment: bool) {
        let segment = std::mem::replace(&mut self.open, OpenSegment::starting_at(next_start));
        let engagement = if self.expected_samples > 0.0 {
            segment.engagement_count as f64 / self.expected_samples
        } else {
            0.0
        };

        debug!(
            start_time = segment.start_time,
            samples = segment.samples,
            engagement,
            final_segment,
            "Segment flushed"
        );
        metrics::record_segment_flushed(final_segment);

        self.closed.push(SegmentSummary {
            time: segment.start_time,
            emotions: segment.emotions.averages(),
            engagement,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podium_models::EmotionLabel;

    const EPS: f64 = 1e-9;

    /// Feed frames 1..=n of a 30 fps stream sampled every 3rd frame.
    fn feed(seg: &mut TemporalSegmenter, frames: u64, attentive: bool) {
        for n in (1..=frames).filter(|n| n % 3 == 0) {
            seg.ingest(n as f64 / 30.0, attentive, None);
        }
    }

    #[test]
    fn test_no_flush_before_window() {
        let mut seg = TemporalSegmenter::new(10.0, 30.0, 3);
        feed(&mut seg, 299, true);
        assert!(seg.segments().is_empty());
    }

    #[test]
    fn test_flush_at_exact_boundary() {
        let mut seg = TemporalSegmenter::new(10.0, 30.0, 3);
        feed(&mut seg, 297, true);
        // frame 300 is at exactly t = 10.0
        assert!(seg.ingest(10.0, true, None));

        let closed = seg.segments();
        assert_eq!(closed.len(), 1);
        assert!(closed[0].time.abs() < EPS);
        // 99 attentive samples over an expected 100
        assert!((closed[0].engagement - 0.99).abs() < EPS);
    }

    #[test]
    fn test_new_segment_starts_at_trigger_timestamp() {
        let mut seg = TemporalSegmenter::new(10.0, 30.0, 3);
        seg.ingest(0.1, true, None);
        seg.ingest(10.3, true, None);
        seg.ingest(20.2, true, None);
        seg.ingest(20.4, true, None);

        let closed = seg.segments();
        assert_eq!(closed.len(), 2);
        assert!(closed[0].time.abs() < EPS);
        // started at the trigger, not at a rounded 10.0
        assert!((closed[1].time - 10.3).abs() < EPS);
    }

    #[test]
    fn test_trailing_segment_dropped_by_default() {
        let mut seg = TemporalSegmenter::new(10.0, 30.0, 3);
        feed(&mut seg, 450, true);
        assert_eq!(seg.finish(false).len(), 1);
    }

    #[test]
    fn test_trailing_segment_flushed_on_request() {
        let mut seg = TemporalSegmenter::new(10.0, 30.0, 3);
        feed(&mut seg, 450, true);
        let closed = seg.finish(true);
        assert_eq!(closed.len(), 2);
        assert!((closed[1].time - 10.0).abs() < EPS);
        // frames 300..=450 step 3: 51 samples over the full window denominator
        assert!((closed[1].engagement - 0.51).abs() < EPS);
    }

    #[test]
    fn test_segment_emotion_means() {
        let mut seg = TemporalSegmenter::new(1.0, 30.0, 3);
        let happy = EmotionVector::new().with(EmotionLabel::Happy, 0.8);
        let calm = EmotionVector::new().with(EmotionLabel::Happy, 0.2);
        seg.ingest(0.1, true, Some(&happy));
        seg.ingest(0.2, false, Some(&calm));
        seg.ingest(1.2, false, None);

        let closed = seg.segments();
        assert!((closed[0].emotions.weight(EmotionLabel::Happy) - 0.5).abs() < EPS);
        assert!(closed[0].emotions.get(EmotionLabel::Sad).is_none());
    }
}
