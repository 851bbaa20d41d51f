//! Worker error types.

use podium_engine::EngineError;
use podium_models::ErrorReport;
use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

/// Suggestions returned when the capture file cannot be read.
pub const PATH_SUGGESTIONS: &[&str] = &[
    "Please provide a valid video file path",
    "Ensure the video file exists",
];

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Video file not found: {0}")]
    CaptureUnavailable(String),

    #[error("Invalid capture file: {0}")]
    InvalidCapture(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkerError {
    pub fn capture_unavailable(msg: impl Into<String>) -> Self {
        Self::CaptureUnavailable(msg.into())
    }

    pub fn invalid_capture(msg: impl Into<String>) -> Self {
        Self::InvalidCapture(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Structured report printed instead of a result.
    pub fn to_report(&self) -> ErrorReport {
        match self {
            WorkerError::CaptureUnavailable(_) | WorkerError::Io(_) => {
                ErrorReport::new(self.to_string(), PATH_SUGGESTIONS)
            }
            WorkerError::Engine(e) => e.to_report(),
            WorkerError::InvalidCapture(_) => EngineError::input_unavailable(self.to_string()).to_report(),
            WorkerError::ConfigError(_) => ErrorReport::new(self.to_string(), &[]),
        }
    }
}
