//! Prometheus-style metrics emitted by the engine.
//!
//! The engine only records; installing a recorder is the driver's job.

use metrics::{counter, histogram};

/// Metric names as constants for consistency.
pub mod names {
    // Video pipeline
    pub const FRAMES_SAMPLED_TOTAL: &str = "podium_frames_sampled_total";
    pub const FRAMES_RECOVERED_TOTAL: &str = "podium_frames_recovered_total";
    pub const SEGMENTS_FLUSHED_TOTAL: &str = "podium_segments_flushed_total";

    // Runs
    pub const ANALYSES_COMPLETED_TOTAL: &str = "podium_analyses_completed_total";
    pub const ANALYSES_FAILED_TOTAL: &str = "podium_analyses_failed_total";
    pub const COMPOSITE_SCORE: &str = "podium_composite_score";
    pub const ANALYSIS_DURATION_SECONDS: &str = "podium_analysis_duration_seconds";
}

/// Record sampled frames.
pub fn record_frames_sampled(count: u64) {
    counter!(names::FRAMES_SAMPLED_TOTAL).increment(count);
}

/// Record a frame whose computation failed and fell back to defaults.
pub fn record_frame_recovered(stage: &'static str) {
    counter!(names::FRAMES_RECOVERED_TOTAL, "stage" => stage).increment(1);
}

/// Record a flushed segment.
pub fn record_segment_flushed(final_segment: bool) {
    let kind = if final_segment { "final" } else { "boundary" };
    counter!(names::SEGMENTS_FLUSHED_TOTAL, "kind" => kind).increment(1);
}

/// Record a completed analysis run and its composite score.
pub fn record_analysis_completed(modality: &'static str, score: f64, duration_secs: f64) {
    counter!(names::ANALYSES_COMPLETED_TOTAL, "modality" => modality).increment(1);
    histogram!(names::COMPOSITE_SCORE, "modality" => modality).record(score);
    histogram!(names::ANALYSIS_DURATION_SECONDS, "modality" => modality).record(duration_secs);
}

/// Record a failed analysis run.
pub fn record_analysis_failed(modality: &'static str, kind: &'static str) {
    counter!(
        names::ANALYSES_FAILED_TOTAL,
        "modality" => modality,
        "kind" => kind
    )
    .increment(1);
}
