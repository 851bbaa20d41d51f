//! Audio feature aggregation.
//!
//! Consumes pre-extracted audio features (voiced intervals, per-frame pitch
//! and RMS) plus a transcript and produces the audio result with its own
//! composite score. Each signal is thresholded independently:
//!
//! - fillers: vocabulary match on lowercase whitespace tokens
//! - pauses: gaps between voiced intervals, long above the threshold
//! - speed: words per minute against the target band
//! - energy: mean RMS and pitch variation buckets

pub mod energy;
pub mod fillers;
pub mod pauses;
pub mod score;
pub mod speed;

use podium_models::{AudioAnalysisResult, AudioFeedback};
use std::time::Instant;
use tracing::{info, warn};

use crate::config::AudioConfig;
use crate::error::{EngineError, EngineResult};
use crate::metrics;
use crate::services::{format_paraphrase, FeedbackWriter, GeneratedFeedback, Paraphraser};

pub use energy::{analyze_energy, classify_energy, pitch_statistics};
pub use fillers::{analyze_fillers, FILLER_WORDS};
pub use pauses::analyze_pauses;
pub use score::{audio_composite, AudioScoreInputs};
pub use speed::{analyze_speed, words_per_minute, Pace};

/// Fallback shown when the transcription service failed.
pub const TRANSCRIPTION_FALLBACK: &str =
    "Transcription was unavailable, so word-based metrics assume an empty transcript.";

/// Pre-extracted features of one recording.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioFeatures {
    /// Recording length in seconds
    pub duration_secs: f64,
    /// Voiced `(start, end)` intervals in seconds, in time order
    pub voiced_intervals: Vec<(f64, f64)>,
    /// Pitch per audio frame in Hz, NaN where unvoiced
    pub pitch: Vec<f64>,
    /// RMS energy per audio frame
    pub rms: Vec<f64>,
}

impl AudioFeatures {
    /// Reject features that cannot come from a readable recording.
    pub fn validate(&self) -> EngineResult<()> {
        if !self.duration_secs.is_finite() || self.duration_secs < 0.0 {
            return Err(EngineError::input_unavailable("Audio file is empty or corrupted"));
        }
        let empty = self.voiced_intervals.is_empty() && self.pitch.is_empty() && self.rms.is_empty();
        if self.duration_secs == 0.0 && empty {
            return Err(EngineError::input_unavailable("Audio file is empty or corrupted"));
        }
        Ok(())
    }
}

/// Runs the audio pass.
pub struct AudioAnalyzer {
    config: AudioConfig,
    paraphraser: Option<Box<dyn Paraphraser>>,
    feedback_writer: Option<Box<dyn FeedbackWriter>>,
}

impl AudioAnalyzer {
    pub fn new(config: AudioConfig) -> Self {
        Self {
            config,
            paraphraser: None,
            feedback_writer: None,
        }
    }

    /// Attach a paraphrase service.
    pub fn with_paraphraser(mut self, paraphraser: Box<dyn Paraphraser>) -> Self {
        self.paraphraser = Some(paraphraser);
        self
    }

    /// Attach a feedback writing service.
    pub fn with_feedback_writer(mut self, writer: Box<dyn FeedbackWriter>) -> Self {
        self.feedback_writer = Some(writer);
        self
    }

    pub fn config(&self) -> &AudioConfig {
        &self.config
    }

    /// Analyze one recording.
    ///
    /// `transcript` is the transcription service's outcome. A failed
    /// transcription is not fatal: the result carries a null transcription
    /// and the word-based metrics see an empty transcript.
    pub fn analyze(
        &self,
        features: &AudioFeatures,
        transcript: EngineResult<String>,
    ) -> EngineResult<AudioAnalysisResult> {
        let started = Instant::now();
        if let Err(e) = features.validate() {
            metrics::record_analysis_failed("audio", e.kind());
            return Err(e);
        }

        let transcription = match transcript {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(error = %e, "Transcription failed, continuing with empty transcript");
                None
            }
        };
        let text = transcription.as_deref().unwrap_or("");

        let filler_words = analyze_fillers(text);
        let pauses = analyze_pauses(&features.voiced_intervals, self.config.pause_threshold_secs);
        let (speed, pace) = analyze_speed(text, features.duration_secs, &self.config);
        let pitch = pitch_statistics(&features.pitch);
        let energy = analyze_energy(&features.rms, &pitch, &self.config);

        let inputs = AudioScoreInputs::new(
            &filler_words,
            &pauses,
            words_per_minute(speed::word_count(text), features.duration_secs),
            pace,
            energy.energy_level,
            pitch.pitch_variation,
        );
        let score_breakdown = audio_composite(&inputs, &self.config);

        let transcription_feedback = match &transcription {
            Some(t) => format!(
                "Transcription completed with {} words recognized.",
                speed::word_count(t)
            ),
            None => TRANSCRIPTION_FALLBACK.to_string(),
        };

        let rule_feedback = AudioFeedback {
            transcription_feedback,
            filler_feedback: fillers::filler_feedback(&filler_words),
            pause_feedback: pauses::pause_feedback(&pauses).to_string(),
            speed_feedback: speed.feedback.clone(),
            energy_feedback: energy::energy_feedback(energy.energy_level).to_string(),
            pitch_feedback: energy::pitch_feedback(&pitch, &self.config).to_string(),
        };

        let paraphrase = match (&self.paraphraser, text.trim().is_empty()) {
            (Some(service), false) => match service.paraphrase(text) {
                Ok(raw) => format_paraphrase(&raw),
                Err(e) => {
                    warn!(service = service.name(), error = %e, "Paraphrase failed");
                    None
                }
            },
            _ => None,
        };

        let mut result = AudioAnalysisResult {
            transcription,
            filler_words,
            pauses,
            speed,
            energy,
            pitch,
            paraphrase,
            overall_score: score_breakdown.total,
            score_breakdown,
            overall_feedback: rule_feedback,
        };

        if let Some(writer) = &self.feedback_writer {
            result.overall_feedback = self.generated_feedback(writer.as_ref(), &result);
        }

        info!(
            overall_score = result.overall_score,
            rating = %result.score_breakdown.rating,
            fillers = result.filler_words.total_fillers,
            long_pauses = result.pauses.long_pauses,
            wpm = result.speed.wpm,
            "Audio analysis completed"
        );
        metrics::record_analysis_completed(
            "audio",
            result.overall_score,
            started.elapsed().as_secs_f64(),
        );

        Ok(result)
    }

    /// Ask the writer for feedback, keeping the rule-based text on failure.
    fn generated_feedback(&self, writer: &dyn FeedbackWriter, result: &AudioAnalysisResult) -> AudioFeedback {
        let base = result.overall_feedback.clone();
        let summary = match serde_json::to_value(result) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Could not summarize audio result for feedback");
                return base;
            }
        };

        match writer
            .write_feedback(&summary)
            .and_then(|raw| GeneratedFeedback::parse(&raw))
        {
            Ok(generated) => generated.merge_into(base),
            Err(e) => {
                warn!(service = writer.name(), error = %e, "Feedback generation failed, using rule-based feedback");
                base
            }
        }
    }
}

impl Default for AudioAnalyzer {
    fn default() -> Self {
        Self::new(AudioConfig::default())
    }
}
