//! Error types for the analysis engine.

use podium_models::ErrorReport;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Suggestions attached to every fatal video error report.
pub const CAPTURE_SUGGESTIONS: &[&str] = &[
    "Ensure good lighting conditions",
    "Make sure your face is clearly visible",
    "Check if the video file is not corrupted",
    "Try recording in a well-lit environment",
    "Maintain a proper distance from the camera",
];

/// Suggestions attached to fatal audio error reports.
pub const AUDIO_SUGGESTIONS: &[&str] = &[
    "Check if the audio file is not corrupted",
    "Record in a quiet environment",
    "Speak clearly and close to the microphone",
];

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The source is missing, unreadable or empty. Fatal.
    #[error("{0}")]
    InputUnavailable(String),

    /// No face was found in any sampled frame. Fatal.
    #[error("No faces detected in the video")]
    NoSignalDetected,

    /// Arithmetic or geometry failure inside a single frame.
    ///
    /// Recovered where it happens; the frame emits a default measurement.
    #[error("Frame computation failed: {0}")]
    FrameComputation(String),

    /// A transcription or text-generation collaborator failed. Non-fatal.
    #[error("{service} failed: {message}")]
    ExternalService {
        service: &'static str,
        message: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    /// Create an input unavailable error.
    pub fn input_unavailable(message: impl Into<String>) -> Self {
        Self::InputUnavailable(message.into())
    }

    /// Create a per-frame computation error.
    pub fn frame_computation(message: impl Into<String>) -> Self {
        Self::FrameComputation(message.into())
    }

    /// Create an external service error.
    pub fn external_service(service: &'static str, message: impl Into<String>) -> Self {
        Self::ExternalService {
            service,
            message: message.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Check if the error aborts the whole analysis run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            EngineError::InputUnavailable(_)
                | EngineError::NoSignalDetected
                | EngineError::InvalidConfig(_)
        )
    }

    /// Short machine-readable kind, used as a metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::InputUnavailable(_) => "input_unavailable",
            EngineError::NoSignalDetected => "no_signal_detected",
            EngineError::FrameComputation(_) => "frame_computation",
            EngineError::ExternalService { .. } => "external_service",
            EngineError::InvalidConfig(_) => "invalid_config",
        }
    }

    /// Convert into the structured report returned for a failed video run.
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport::new(self.to_string(), CAPTURE_SUGGESTIONS)
    }

    /// Convert into the structured report returned for a failed audio run.
    pub fn to_audio_report(&self) -> ErrorReport {
        ErrorReport::new(self.to_string(), AUDIO_SUGGESTIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(EngineError::NoSignalDetected.is_fatal());
        assert!(EngineError::input_unavailable("Video file is empty or corrupted").is_fatal());
        assert!(!EngineError::frame_computation("zero shoulder width").is_fatal());
        assert!(!EngineError::external_service("transcription", "timeout").is_fatal());
    }

    #[test]
    fn test_report_carries_suggestions() {
        let report = EngineError::NoSignalDetected.to_report();
        assert_eq!(report.error, "No faces detected in the video");
        assert_eq!(report.details.suggestions.len(), CAPTURE_SUGGESTIONS.len());
        assert_eq!(report.details.suggestions[0], "Ensure good lighting conditions");
    }

    #[test]
    fn test_external_service_message() {
        let err = EngineError::external_service("paraphrase", "quota exhausted");
        assert_eq!(err.to_string(), "paraphrase failed: quota exhausted");
        assert_eq!(err.kind(), "external_service");
    }
}
