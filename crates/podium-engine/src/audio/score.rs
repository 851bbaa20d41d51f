//! Audio composite score.
//!
//! Starts at 100, subtracts filler and long-pause penalties, adds up to three
//! bonuses and clamps to `[score_floor, 100]`. The floor keeps a delivery
//! score from ever looking like a failure.

use podium_models::{round_to, CompositeScore, EnergyLevel, FillerWordAnalysis, PauseAnalysis};
use std::collections::BTreeMap;

use super::speed::Pace;
use crate::config::AudioConfig;

/// Signals the audio composite is computed from.
#[derive(Debug, Clone, Copy)]
pub struct AudioScoreInputs {
    pub total_fillers: u64,
    pub long_pauses: u64,
    pub wpm: f64,
    pub pace: Pace,
    pub energy: EnergyLevel,
    pub pitch_std: f64,
}

impl AudioScoreInputs {
    pub fn new(
        fillers: &FillerWordAnalysis,
        pauses: &PauseAnalysis,
        wpm: f64,
        pace: Pace,
        energy: EnergyLevel,
        pitch_std: f64,
    ) -> Self {
        Self {
            total_fillers: fillers.total_fillers,
            long_pauses: pauses.long_pauses,
            wpm,
            pace,
            energy,
            pitch_std,
        }
    }
}

/// Unclamped composite total.
pub fn raw_total(inputs: &AudioScoreInputs, config: &AudioConfig) -> f64 {
    let mut total = 100.0;
    total -= inputs.total_fillers as f64 * config.filler_penalty.per_filler();
    total -= inputs.long_pauses as f64 * config.long_pause_penalty;

    if inputs.pace == Pace::Optimal {
        total += config.bonus_points;
    }
    if inputs.energy.is_engaging() {
        total += config.bonus_points;
    }
    if inputs.pitch_std > config.pitch_bonus_threshold {
        total += config.bonus_points;
    }
    total
}

/// Per-dimension sub-scores, each in [0, 100].
///
/// - fluency: 100 − 5 points per weighted filler
/// - pausing: 100 − 10 points per long pause
/// - pace: 100 inside the target band, −2 per wpm outside it
/// - energy: 100 high, 75 moderate, 40 low
/// - pitch_variation: pitch std relative to the bonus threshold
pub fn sub_scores(inputs: &AudioScoreInputs, config: &AudioConfig) -> BTreeMap<String, f64> {
    let fluency = 100.0 - inputs.total_fillers as f64 * config.filler_penalty.per_filler() * 5.0;
    let pausing = 100.0 - inputs.long_pauses as f64 * 10.0;

    let off_band = ((inputs.wpm - config.target_wpm).abs() - config.wpm_tolerance).max(0.0);
    let pace = 100.0 - off_band * 2.0;

    let energy = match inputs.energy {
        EnergyLevel::High => 100.0,
        EnergyLevel::Moderate => 75.0,
        EnergyLevel::Low => 40.0,
    };

    let pitch_variation = if config.pitch_bonus_threshold > 0.0 {
        inputs.pitch_std / config.pitch_bonus_threshold * 100.0
    } else {
        100.0
    };

    [
        ("fluency", fluency),
        ("pausing", pausing),
        ("pace", pace),
        ("energy", energy),
        ("pitch_variation", pitch_variation),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), round_to(value.clamp(0.0, 100.0), 1)))
    .collect()
}

/// Clamped, rated audio composite.
pub fn audio_composite(inputs: &AudioScoreInputs, config: &AudioConfig) -> CompositeScore {
    let total = round_to(raw_total(inputs, config).clamp(config.score_floor, 100.0), 1);
    CompositeScore::new(sub_scores(inputs, config), total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FillerPenalty;
    use podium_models::Rating;

    fn inputs(fillers: u64, long_pauses: u64) -> AudioScoreInputs {
        AudioScoreInputs {
            total_fillers: fillers,
            long_pauses,
            wpm: 150.0,
            pace: Pace::Optimal,
            energy: EnergyLevel::Moderate,
            pitch_std: 20.0,
        }
    }

    #[test]
    fn test_penalties_and_bonuses() {
        let config = AudioConfig::default();
        // 100 − 4·1.5 − 2·2 + 5 + 5
        assert!((raw_total(&inputs(4, 2), &config) - 100.0).abs() < 1e-9);

        let strict = config.clone().with_filler_penalty(FillerPenalty::Strict);
        assert!((raw_total(&inputs(4, 2), &strict) - 98.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_floor() {
        let config = AudioConfig::default();
        let score = audio_composite(&inputs(50, 20), &config);
        assert!((score.total - 60.0).abs() < 1e-9);
        assert_eq!(score.rating, Rating::Good);
    }

    #[test]
    fn test_score_ceiling() {
        let config = AudioConfig::default();
        let mut best = inputs(0, 0);
        best.energy = EnergyLevel::High;
        best.pitch_std = 55.0;
        let score = audio_composite(&best, &config);
        assert!((score.total - 100.0).abs() < 1e-9);
        assert_eq!(score.rating, Rating::Outstanding);
    }

    #[test]
    fn test_sub_scores_bounded() {
        let config = AudioConfig::default();
        let mut extreme = inputs(80, 40);
        extreme.wpm = 400.0;
        extreme.pace = Pace::Fast;
        extreme.pitch_std = 500.0;
        let subs = sub_scores(&extreme, &config);
        assert_eq!(subs.len(), 5);
        for value in subs.values() {
            assert!((0.0..=100.0).contains(value));
        }
        assert!(subs["fluency"].abs() < 1e-9);
        assert!((subs["pitch_variation"] - 100.0).abs() < 1e-9);
    }
}
