use serde::{Deserialize, Serialize};

use super::error::SynthError;

/// Synthesis parameters, supplied as an immutable snapshot per playback
/// trigger. Reloading settings produces a new snapshot; a running session
/// never sees its parameters change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthParams {
    /// Output sample rate in Hz.
    #[serde(rename = "fs")]
    pub sample_rate: u32,
    /// Partials generated per note.
    pub n_harmonics: usize,
    /// Amplitude rolloff: amp_k = 1 / k^rolloff_coeff.
    pub rolloff_coeff: f64,
    /// Decay time of the fundamental in seconds.
    pub decay_time: f64,
    /// Higher partials decay faster when positive: tau_k = decay_time / k^decay_exponent.
    pub decay_exponent: f64,
    /// Reference frequency of the inharmonicity model in Hz.
    pub f0: f64,
    /// Inharmonicity coefficient at the reference frequency.
    #[serde(rename = "B0")]
    pub b0: f64,
    /// Power-law exponent of the inharmonicity model.
    pub beta: f64,
    /// Uniform per-partial frequency perturbation in Hz, drawn once per chord.
    pub jitter: f64,
    /// Frames per audio callback.
    pub block_size: u32,
    /// Playback length in seconds.
    pub duration: f64,
}

impl SynthParams {
    /// Rejects snapshots that cannot drive a session. Called before any
    /// partial is built, so a bad snapshot never reaches the audio layer.
    pub fn validate(&self) -> Result<(), SynthError> {
        if self.sample_rate == 0 {
            return Err(SynthError::InvalidParams(
                "sample rate must be positive".to_string(),
            ));
        }
        if self.n_harmonics == 0 {
            return Err(SynthError::InvalidParams(
                "n_harmonics must be at least 1".to_string(),
            ));
        }
        if !self.rolloff_coeff.is_finite() {
            return Err(SynthError::InvalidParams(format!(
                "rolloff_coeff must be finite, got {}",
                self.rolloff_coeff
            )));
        }
        if !(self.decay_time > 0.0) || !self.decay_time.is_finite() {
            return Err(SynthError::InvalidParams(format!(
                "decay_time must be positive, got {}",
                self.decay_time
            )));
        }
        if !self.decay_exponent.is_finite() {
            return Err(SynthError::InvalidParams(format!(
                "decay_exponent must be finite, got {}",
                self.decay_exponent
            )));
        }
        if self.f0 == 0.0 || !self.f0.is_finite() {
            return Err(SynthError::InvalidParams(format!(
                "inharmonicity reference frequency f0 must be nonzero, got {}",
                self.f0
            )));
        }
        if !self.beta.is_finite() {
            return Err(SynthError::InvalidParams(format!(
                "beta must be finite, got {}",
                self.beta
            )));
        }
        if self.jitter < 0.0 || !self.jitter.is_finite() {
            return Err(SynthError::InvalidParams(format!(
                "jitter must be zero or positive, got {}",
                self.jitter
            )));
        }
        if self.block_size == 0 {
            return Err(SynthError::InvalidParams(
                "block_size must be positive".to_string(),
            ));
        }
        if !(self.duration > 0.0) || !self.duration.is_finite() {
            return Err(SynthError::InvalidParams(format!(
                "duration must be positive, got {}",
                self.duration
            )));
        }
        Ok(())
    }
}

impl Default for SynthParams {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            n_harmonics: 8,
            rolloff_coeff: 1.2,
            decay_time: 2.5,
            decay_exponent: 0.7,
            f0: 440.0,
            b0: 1.0e-4,
            beta: 0.5,
            jitter: 0.3,
            block_size: 4096,
            duration: 2.0,
        }
    }
}
