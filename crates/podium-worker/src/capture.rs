//! Recorded signal captures and their replay provider.
//!
//! A capture holds what the perception models and the audio feature
//! extractor reported for one recording, so the engine can be run without
//! any decoder or model:
//!
//! ```json
//! {
//!   "source_name": "talk.mp4", "fps": 30.0, "total_frames": 300,
//!   "frames": [{"index": 3, "face_detected": true, "keypoints": {..}}],
//!   "audio": {"duration_secs": 10.0, "voiced_intervals": [[0.0, 1.2]],
//!             "pitch": [120.0, null], "rms": [0.02], "transcript": ".."}
//! }
//! ```

use podium_engine::{
    AudioFeatures, EngineError, EngineResult, Perception, PerceptionProvider, StreamInfo,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::error::{WorkerError, WorkerResult};

/// One sampled frame as recorded.
#[derive(Debug, Clone, Deserialize)]
pub struct CapturedFrame {
    /// 1-based decoded frame number
    pub index: u64,
    #[serde(flatten)]
    pub perception: Perception,
}

/// Recorded audio features.
#[derive(Debug, Clone, Deserialize)]
pub struct AudioCapture {
    pub duration_secs: f64,
    #[serde(default)]
    pub voiced_intervals: Vec<(f64, f64)>,
    /// Pitch per audio frame, null where unvoiced
    #[serde(default)]
    pub pitch: Vec<Option<f64>>,
    #[serde(default)]
    pub rms: Vec<f64>,
    #[serde(default)]
    pub transcript: Option<String>,
    /// Set when the transcription service failed
    #[serde(default)]
    pub transcript_error: Option<String>,
}

impl AudioCapture {
    /// Engine features; unvoiced pitch frames become NaN.
    pub fn features(&self) -> AudioFeatures {
        AudioFeatures {
            duration_secs: self.duration_secs,
            voiced_intervals: self.voiced_intervals.clone(),
            pitch: self.pitch.iter().map(|p| p.unwrap_or(f64::NAN)).collect(),
            rms: self.rms.clone(),
        }
    }

    /// Transcription outcome as the engine expects it.
    pub fn transcript(&self) -> EngineResult<String> {
        match &self.transcript_error {
            Some(message) => Err(EngineError::external_service("transcription", message.clone())),
            None => Ok(self.transcript.clone().unwrap_or_default()),
        }
    }
}

/// A complete recording capture.
#[derive(Debug, Clone, Deserialize)]
pub struct Capture {
    pub source_name: String,
    pub fps: f64,
    pub total_frames: u64,
    #[serde(default)]
    pub frames: Vec<CapturedFrame>,
    #[serde(default)]
    pub audio: Option<AudioCapture>,
}

impl Capture {
    /// Read and parse a capture file.
    pub fn load(path: impl AsRef<Path>) -> WorkerResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(WorkerError::capture_unavailable(path.display().to_string()));
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> WorkerResult<Self> {
        serde_json::from_str(raw).map_err(|e| WorkerError::invalid_capture(e.to_string()))
    }

    /// Split into the video replay provider and the audio part.
    pub fn into_parts(self) -> (ReplayProvider, Option<AudioCapture>) {
        let frames = self
            .frames
            .into_iter()
            .map(|f| (f.index, f.perception))
            .collect();
        let provider = ReplayProvider {
            info: StreamInfo {
                source_name: self.source_name,
                fps: self.fps,
                total_frames: self.total_frames,
            },
            frames,
            released: false,
        };
        (provider, self.audio)
    }
}

/// Replays recorded perception results.
///
/// Frames missing from the capture are perceived as "nothing detected".
#[derive(Debug)]
pub struct ReplayProvider {
    info: StreamInfo,
    frames: HashMap<u64, Perception>,
    released: bool,
}

impl ReplayProvider {
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl PerceptionProvider for ReplayProvider {
    fn stream_info(&self) -> EngineResult<StreamInfo> {
        if self.released {
            return Err(EngineError::input_unavailable("Capture already released"));
        }
        Ok(self.info.clone())
    }

    fn perceive(&mut self, frame_number: u64, _timestamp: f64) -> EngineResult<Perception> {
        Ok(self.frames.remove(&frame_number).unwrap_or_default())
    }

    fn release(&mut self) {
        debug!(remaining = self.frames.len(), "Releasing capture frames");
        self.frames.clear();
        self.released = true;
    }

    fn name(&self) -> &'static str {
        "capture_replay"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CAPTURE: &str = r#"{
        "source_name": "talk.mp4",
        "fps": 30.0,
        "total_frames": 9,
        "frames": [
            {"index": 3, "face_detected": true,
             "emotion": {"happy": 0.6, "neutral": 0.4},
             "keypoints": {"nose": {"x": 0.5, "y": 0.3}, "left_ear": {"x": 0.45, "y": 0.35}}},
            {"index": 6, "face_detected": false}
        ],
        "audio": {
            "duration_secs": 4.0,
            "voiced_intervals": [[0.0, 1.0], [2.0, 3.0]],
            "pitch": [110.0, null, 130.0],
            "rms": [0.02, 0.03],
            "transcript": "hello um world"
        }
    }"#;

    #[test]
    fn test_parse_capture() {
        let capture = Capture::from_json(CAPTURE).unwrap();
        assert_eq!(capture.frames.len(), 2);
        assert!(capture.frames[0].perception.face_detected);
        assert!(capture.frames[0].perception.keypoints.is_some());
        assert!(!capture.frames[1].perception.has_face());

        let audio = capture.audio.unwrap();
        let features = audio.features();
        assert_eq!(features.pitch.len(), 3);
        assert!(features.pitch[1].is_nan());
        assert_eq!(audio.transcript().unwrap(), "hello um world");
    }

    #[test]
    fn test_replay_fills_missing_frames() {
        let (mut provider, _) = Capture::from_json(CAPTURE).unwrap().into_parts();
        assert_eq!(provider.stream_info().unwrap().total_frames, 9);
        assert!(provider.perceive(3, 0.1).unwrap().has_face());
        assert_eq!(provider.perceive(9, 0.3).unwrap(), Perception::nothing());

        provider.release();
        assert!(provider.is_released());
        assert!(provider.stream_info().is_err());
    }

    #[test]
    fn test_transcript_error_is_external_failure() {
        let audio = AudioCapture {
            duration_secs: 1.0,
            voiced_intervals: vec![],
            pitch: vec![],
            rms: vec![],
            transcript: None,
            transcript_error: Some("service unavailable".to_string()),
        };
        let err = audio.transcript().unwrap_err();
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CAPTURE.as_bytes()).unwrap();
        let capture = Capture::load(file.path()).unwrap();
        assert_eq!(capture.source_name, "talk.mp4");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Capture::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, WorkerError::CaptureUnavailable(_)));
    }

    #[test]
    fn test_load_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not a capture").unwrap();
        let err = Capture::load(file.path()).unwrap_err();
        assert!(matches!(err, WorkerError::InvalidCapture(_)));
    }
}
