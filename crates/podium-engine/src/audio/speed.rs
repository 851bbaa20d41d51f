//! Speaking rate.

use podium_models::{round_to, SpeechSpeed};

use crate::config::AudioConfig;

/// Pace relative to the target rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    Slow,
    Optimal,
    Fast,
}

impl Pace {
    pub fn classify(wpm: f64, config: &AudioConfig) -> Self {
        if wpm < config.target_wpm - config.wpm_tolerance {
            Pace::Slow
        } else if wpm > config.target_wpm + config.wpm_tolerance {
            Pace::Fast
        } else {
            Pace::Optimal
        }
    }

    pub fn feedback(&self) -> &'static str {
        match self {
            Pace::Slow => "You are speaking slowly. Try increasing your pace.",
            Pace::Fast => "You are speaking fast. Consider slowing down for clarity.",
            Pace::Optimal => "Your speaking pace is within an optimal range.",
        }
    }
}

/// Number of whitespace-separated words.
pub fn word_count(transcript: &str) -> usize {
    transcript.split_whitespace().count()
}

/// Words per minute; a non-positive duration counts as one minute.
pub fn words_per_minute(words: usize, duration_secs: f64) -> f64 {
    let minutes = if duration_secs > 0.0 {
        duration_secs / 60.0
    } else {
        1.0
    };
    words as f64 / minutes
}

/// Speaking rate block and its pace class.
pub fn analyze_speed(transcript: &str, duration_secs: f64, config: &AudioConfig) -> (SpeechSpeed, Pace) {
    let wpm = words_per_minute(word_count(transcript), duration_secs);
    let pace = Pace::classify(wpm, config);

    let speed = SpeechSpeed {
        wpm: round_to(wpm, 2),
        duration_sec: round_to(duration_secs.max(0.0), 2),
        feedback: pace.feedback().to_string(),
    };
    (speed, pace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wpm() {
        assert!((words_per_minute(150, 60.0) - 150.0).abs() < 1e-9);
        assert!((words_per_minute(50, 20.0) - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_duration_counts_as_one_minute() {
        assert!((words_per_minute(42, 0.0) - 42.0).abs() < 1e-9);
        assert!((words_per_minute(42, -3.0) - 42.0).abs() < 1e-9);
    }

    #[test]
    fn test_pace_band_edges() {
        let config = AudioConfig::default();
        assert_eq!(Pace::classify(130.0, &config), Pace::Optimal);
        assert_eq!(Pace::classify(170.0, &config), Pace::Optimal);
        assert_eq!(Pace::classify(129.9, &config), Pace::Slow);
        assert_eq!(Pace::classify(170.1, &config), Pace::Fast);
    }

    #[test]
    fn test_analyze_speed() {
        let config = AudioConfig::default();
        let (speed, pace) = analyze_speed("one two three", 1.0, &config);
        assert!((speed.wpm - 180.0).abs() < 1e-9);
        assert_eq!(pace, Pace::Fast);
        assert_eq!(speed.feedback, "You are speaking fast. Consider slowing down for clarity.");
    }
}
