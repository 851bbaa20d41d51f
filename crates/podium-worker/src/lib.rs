//! Capture replay worker.
//!
//! This crate provides:
//! - Environment-driven configuration for both analysis passes
//! - Loading of recorded signal captures and a replay perception provider
//! - A runner that produces the combined JSON output or an error report
//! - Structured run logging

pub mod capture;
pub mod config;
pub mod error;
pub mod logging;
pub mod runner;

pub use capture::{AudioCapture, Capture, CapturedFrame, ReplayProvider};
pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use logging::AnalysisLogger;
pub use runner::{AnalysisOutput, AudioSection, CaptureRunner};
