//! Structured run logging.
//!
//! Every capture run gets a fresh id; the engine's log lines nest under the
//! run span.

use podium_engine::EngineError;
use podium_models::VideoAnalysisResult;
use tracing::{error, info, warn, Span};
use uuid::Uuid;

use crate::error::WorkerError;

/// Logs the milestones of one capture run.
#[derive(Debug, Clone)]
pub struct AnalysisLogger {
    run_id: Uuid,
}

impl Default for AnalysisLogger {
    fn default() -> Self {
        Self::with_run_id(Uuid::new_v4())
    }
}

impl AnalysisLogger {
    pub fn with_run_id(run_id: Uuid) -> Self {
        Self { run_id }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Span for the whole run of `path`.
    pub fn span(&self, path: &str) -> Span {
        tracing::info_span!("analysis", run_id = %self.run_id, path = %path)
    }

    pub fn capture_loaded(&self, source_name: &str, total_frames: u64, has_audio: bool) {
        info!(
            run_id = %self.run_id,
            source = %source_name,
            total_frames,
            has_audio,
            "Capture loaded"
        );
    }

    /// The audio pass failed but the video result still stands.
    pub fn audio_failed(&self, err: &EngineError) {
        warn!(run_id = %self.run_id, error = %err, "Audio pass failed");
    }

    pub fn video_scored(&self, result: &VideoAnalysisResult) {
        info!(
            run_id = %self.run_id,
            total_score = result.assessment.total_score,
            rating = %result.assessment.rating,
            samples = result.eye_contact_analysis.looking_at_screen
                + result.eye_contact_analysis.not_looking_at_screen,
            "Video pass scored"
        );
    }

    /// The run ends with an error report instead of a result.
    pub fn run_failed(&self, err: &WorkerError) {
        error!(run_id = %self.run_id, error = %err, "Run failed");
    }
}
