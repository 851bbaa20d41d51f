//! Runs both analysis passes over one capture.

use metrics::counter;
use podium_engine::{AudioAnalyzer, VideoAnalyzer};
use podium_models::{AudioAnalysisResult, ErrorReport, VideoAnalysisResult};
use serde::Serialize;

use crate::capture::Capture;
use crate::config::WorkerConfig;
use crate::error::WorkerResult;
use crate::logging::AnalysisLogger;

const CAPTURES_PROCESSED_TOTAL: &str = "podium_captures_processed_total";

/// Audio section of the output: a result, or the report of a fatal audio
/// failure that did not stop the video pass.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AudioSection {
    Result(Box<AudioAnalysisResult>),
    Failed(ErrorReport),
}

/// Combined output printed by the worker.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutput {
    pub video: VideoAnalysisResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioSection>,
}

/// Runs the video and audio passes with a fixed configuration.
pub struct CaptureRunner {
    video: VideoAnalyzer,
    audio: AudioAnalyzer,
}

impl CaptureRunner {
    pub fn new(config: &WorkerConfig) -> Self {
        Self {
            video: VideoAnalyzer::new(config.analysis.clone()),
            audio: AudioAnalyzer::new(config.audio.clone()),
        }
    }

    /// Analyze a capture. A fatal video error fails the run; a fatal audio
    /// error is reported inside the output.
    pub fn run(&self, capture: Capture, logger: &AnalysisLogger) -> WorkerResult<AnalysisOutput> {
        logger.capture_loaded(&capture.source_name, capture.total_frames, capture.audio.is_some());
        let (mut provider, audio_capture) = capture.into_parts();

        let video = match self.video.analyze(&mut provider) {
            Ok(result) => result,
            Err(e) => {
                counter!(CAPTURES_PROCESSED_TOTAL, "status" => "failed").increment(1);
                return Err(e.into());
            }
        };

        let audio = audio_capture.map(|audio| {
            match self.audio.analyze(&audio.features(), audio.transcript()) {
                Ok(result) => AudioSection::Result(Box::new(result)),
                Err(e) => {
                    logger.audio_failed(&e);
                    AudioSection::Failed(e.to_audio_report())
                }
            }
        });

        counter!(CAPTURES_PROCESSED_TOTAL, "status" => "completed").increment(1);
        logger.video_scored(&video);

        Ok(AnalysisOutput { video, audio })
    }
}
