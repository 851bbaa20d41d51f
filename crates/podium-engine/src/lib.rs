#![deny(unreachable_patterns)]
//! Presentation signal analysis engine.
//!
//! This crate provides:
//! - Geometric posture estimation from body keypoints
//! - Pluggable attention classification (face presence or gaze)
//! - Emotion accumulation and fixed-window engagement segments
//! - Composite video scoring with named strategies
//! - Audio delivery analysis (fillers, pauses, pace, energy, pitch)
//!
//! Perception models and decoders are external. They are reached through
//! the [`PerceptionProvider`] trait so tests can feed synthetic frames.

pub mod attention;
pub mod audio;
pub mod config;
pub mod emotion;
pub mod engagement;
pub mod error;
pub mod metrics;
pub mod perception;
pub mod pipeline;
pub mod posture;
pub mod scoring;
pub mod segmenter;
pub mod services;


pub use attention::{classifier_for, AttentionClassifier, FacePresenceClassifier, GazeClassifier};
pub use audio::{AudioAnalyzer, AudioFeatures};
pub use config::{AnalysisConfig, AttentionMode, AudioConfig, FillerPenalty, ScoringMode};
pub use error::{EngineError, EngineResult};
pub use perception::{
    EyeContour, EyePair, FrameObservation, KeypointFrame, Landmark, Perception,
    PerceptionProvider, Point2, ProviderGuard, StreamInfo,
};
pub use pipeline::{VideoAnalyzer, VideoSession};
pub use posture::{PostureEstimate, PostureEstimator};
pub use scoring::{CompositeScorer, ScoringStrategy};
pub use services::{FeedbackWriter, Paraphraser};
