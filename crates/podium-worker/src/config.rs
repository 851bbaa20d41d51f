//! Worker configuration.

use podium_engine::{AnalysisConfig, AttentionMode, AudioConfig, FillerPenalty, ScoringMode};

use crate::error::{WorkerError, WorkerResult};

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Capture file used when no path is given on the command line
    pub capture_path: Option<String>,
    /// Video pass settings
    pub analysis: AnalysisConfig,
    /// Audio pass settings
    pub audio: AudioConfig,
    /// Install the Prometheus recorder and log a snapshot after the run
    pub metrics_enabled: bool,
    /// Pretty-print the JSON result
    pub pretty_output: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            capture_path: None,
            analysis: AnalysisConfig::default(),
            audio: AudioConfig::default(),
            metrics_enabled: false,
            pretty_output: true,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

/// Parse a named strategy, failing loudly on unknown names.
fn env_mode<T>(key: &str) -> WorkerResult<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|e| WorkerError::config_error(format!("{key}: {e}"))),
        Err(_) => Ok(None),
    }
}

impl WorkerConfig {
    /// Create config from `PODIUM_*` environment variables.
    pub fn from_env() -> WorkerResult<Self> {
        let mut analysis = AnalysisConfig::default();
        if let Some(stride) = env_parse("PODIUM_SAMPLE_STRIDE") {
            analysis = analysis.with_sample_stride(stride);
        }
        if let Some(secs) = env_parse("PODIUM_SEGMENT_SECS") {
            analysis = analysis.with_segment_duration(secs);
        }
        analysis = analysis
            .with_flush_final_segment(env_flag("PODIUM_FLUSH_FINAL_SEGMENT", false))
            .with_parallel_frames(env_flag("PODIUM_PARALLEL_FRAMES", false));
        if let Some(size) = env_parse("PODIUM_BATCH_SIZE") {
            analysis = analysis.with_batch_size(size);
        }
        if let Some(mode) = env_mode::<AttentionMode>("PODIUM_ATTENTION_MODE")? {
            analysis = analysis.with_attention(mode);
        }
        if let Some(ear) = env_parse("PODIUM_MIN_OPEN_EAR") {
            analysis = analysis.with_min_open_ear(ear);
        }
        if let Some(mode) = env_mode::<ScoringMode>("PODIUM_SCORING_MODE")? {
            analysis = analysis.with_scoring(mode);
        }

        let mut audio = AudioConfig::default();
        if let Some(penalty) = env_mode::<FillerPenalty>("PODIUM_FILLER_PENALTY")? {
            audio = audio.with_filler_penalty(penalty);
        }
        if let Some(secs) = env_parse("PODIUM_PAUSE_THRESHOLD_SECS") {
            audio = audio.with_pause_threshold(secs);
        }
        if let Some(wpm) = env_parse("PODIUM_TARGET_WPM") {
            audio = audio.with_target_wpm(wpm);
        }

        Ok(Self {
            capture_path: std::env::var("PODIUM_CAPTURE_PATH").ok(),
            analysis,
            audio,
            metrics_enabled: env_flag("METRICS_ENABLED", false),
            pretty_output: env_flag("PODIUM_PRETTY_OUTPUT", true),
        })
    }
}
