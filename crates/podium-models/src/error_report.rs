//! Structured error object returned instead of a result on fatal failures.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Fatal error report: a message plus actionable suggestions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorReport {
    pub error: String,
    pub details: ErrorDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorDetails {
    pub suggestions: Vec<String>,
}

impl ErrorReport {
    /// Create a report from a message and literal suggestions.
    pub fn new(error: impl Into<String>, suggestions: &[&str]) -> Self {
        Self {
            error: error.into(),
            details: ErrorDetails {
                suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
            },
        }
    }
}
