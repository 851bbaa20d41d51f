//! Vocal energy and pitch statistics.

use podium_models::{EnergyAnalysis, EnergyLevel, PitchAnalysis};

use crate::config::AudioConfig;

/// Pitch statistics over voiced (finite, positive) frames.
///
/// Unvoiced frames are NaN in the input series. The standard deviation is
/// the population one. Without voiced frames every statistic is 0.
pub fn pitch_statistics(pitch: &[f64]) -> PitchAnalysis {
    let voiced: Vec<f64> = pitch.iter().copied().filter(|p| p.is_finite() && *p > 0.0).collect();
    if voiced.is_empty() {
        return PitchAnalysis::default();
    }

    let n = voiced.len() as f64;
    let mean = voiced.iter().sum::<f64>() / n;
    let variance = voiced.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / n;

    PitchAnalysis {
        average_pitch: mean,
        pitch_variation: variance.sqrt(),
        min_pitch: voiced.iter().copied().fold(f64::INFINITY, f64::min),
        max_pitch: voiced.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        voiced_ratio: n / pitch.len() as f64,
    }
}

/// Mean of the finite RMS values, 0 for an empty series.
pub fn mean_rms(rms: &[f64]) -> f64 {
    let finite: Vec<f64> = rms.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return 0.0;
    }
    finite.iter().sum::<f64>() / finite.len() as f64
}

/// Classify vocal energy.
///
/// High needs both loudness and pitch variation; quiet speech is Low
/// regardless of pitch.
pub fn classify_energy(avg_rms: f64, pitch_std: f64, config: &AudioConfig) -> EnergyLevel {
    if avg_rms > config.high_energy_rms && pitch_std > config.high_energy_pitch_std {
        EnergyLevel::High
    } else if avg_rms < config.low_energy_rms {
        EnergyLevel::Low
    } else {
        EnergyLevel::Moderate
    }
}

/// Energy block for a pass.
pub fn analyze_energy(rms: &[f64], pitch: &PitchAnalysis, config: &AudioConfig) -> EnergyAnalysis {
    let avg_rms = mean_rms(rms);
    EnergyAnalysis {
        avg_rms,
        pitch_variation: pitch.pitch_variation,
        energy_level: classify_energy(avg_rms, pitch.pitch_variation, config),
    }
}

/// Rule-based energy feedback.
pub fn energy_feedback(level: EnergyLevel) -> &'static str {
    match level {
        EnergyLevel::High => "Your vocal energy is high and engaging.",
        EnergyLevel::Moderate => {
            "Your vocal energy is steady. Stress key points to lift it further."
        }
        EnergyLevel::Low => "Your voice sounds low in energy. Try projecting more.",
    }
}

/// Rule-based pitch feedback.
pub fn pitch_feedback(pitch: &PitchAnalysis, config: &AudioConfig) -> &'static str {
    if pitch.voiced_ratio == 0.0 {
        "No voiced speech was detected for pitch analysis."
    } else if pitch.pitch_variation > config.pitch_bonus_threshold {
        "Good pitch variation keeps your delivery lively."
    } else {
        "Your pitch is fairly flat. Vary your tone to avoid sounding monotone."
    }
}
