use rand::Rng;

use super::envelope::DecayEnvelope;
use super::error::SynthError;
use super::inharmonicity::InharmonicityModel;
use super::params::SynthParams;
use super::ratio;

/// Ceiling for the worst-case in-phase sum of all partials after
/// normalization. Keeps the output inside [-1, 1] regardless of chord size.
pub const TARGET_PEAK: f64 = 0.3;

/// A chord to synthesize: base pitch plus one ratio expression per note.
#[derive(Debug, Clone)]
pub struct ChordRequest {
    pub base_frequency: f64,
    pub ratios: Vec<String>,
}

impl ChordRequest {
    pub fn new(base_frequency: f64, ratios: Vec<String>) -> Self {
        Self {
            base_frequency,
            ratios,
        }
    }
}

/// One sinusoidal component of a synthesized chord.
#[derive(Debug, Clone)]
pub struct Partial {
    /// Frequency in Hz, jitter included. Always strictly positive.
    pub frequency: f64,
    /// Pre-normalization amplitude.
    pub amplitude: f64,
    /// Per-partial decay envelope.
    pub envelope: DecayEnvelope,
}

/// The flat partial set for one chord, plus the gain that keeps the summed
/// signal clip-free. A multi-note chord is one bank of independently
/// decaying sinusoids, not separate voices.
#[derive(Debug, Clone)]
pub struct PartialBank {
    pub partials: Vec<Partial>,
    /// Global gain: TARGET_PEAK / sum of amplitudes.
    pub norm: f64,
}

impl PartialBank {
    /// Expands a chord request into `ratios.len() * n_harmonics` partials.
    ///
    /// Per ratio r: pitch = base * eval(r), B = model(pitch), and for each
    /// harmonic k: f_k = pitch * k * sqrt(1 + B k^2), amp_k = 1 / k^p,
    /// tau_k = decay_time / k^d. Jitter is drawn from `rng` once per build,
    /// never per block.
    pub fn build_with_rng<R: Rng + ?Sized>(
        request: &ChordRequest,
        params: &SynthParams,
        rng: &mut R,
    ) -> Result<Self, SynthError> {
        params.validate()?;
        if !(request.base_frequency > 0.0) || !request.base_frequency.is_finite() {
            return Err(SynthError::InvalidParams(format!(
                "base frequency must be positive, got {}",
                request.base_frequency
            )));
        }
        if request.ratios.is_empty() {
            return Err(SynthError::InvalidParams(
                "chord request has no ratios".to_string(),
            ));
        }

        let model = InharmonicityModel::from_params(params);
        let mut partials = Vec::with_capacity(request.ratios.len() * params.n_harmonics);

        for expression in &request.ratios {
            let multiplier = ratio::eval_ratio(expression)?;
            let pitch = request.base_frequency * multiplier;
            let b = model.coefficient(pitch)?;

            for k in 1..=params.n_harmonics {
                let k_f = k as f64;

                let radicand = 1.0 + b * k_f * k_f;
                if radicand < 0.0 {
                    return Err(SynthError::NumericDomain(format!(
                        "harmonic {} of {:.3} Hz: stretch radicand is negative ({})",
                        k, pitch, radicand
                    )));
                }
                let exact = pitch * k_f * radicand.sqrt();

                let mut frequency = exact;
                if params.jitter > 0.0 {
                    frequency += rng.random_range(-params.jitter..params.jitter);
                    if frequency <= 0.0 {
                        // Jitter is small relative to the partial in practice;
                        // fall back to the exact frequency rather than emit DC.
                        frequency = exact;
                    }
                }

                let amplitude = 1.0 / k_f.powf(params.rolloff_coeff);
                if !(amplitude > 0.0) || !amplitude.is_finite() {
                    return Err(SynthError::NumericDomain(format!(
                        "harmonic {}: rolloff produced amplitude {}",
                        k, amplitude
                    )));
                }

                let tau = params.decay_time / k_f.powf(params.decay_exponent);
                if !(tau > 0.0) || !tau.is_finite() {
                    return Err(SynthError::NumericDomain(format!(
                        "harmonic {}: decay shaping produced time constant {}",
                        k, tau
                    )));
                }

                partials.push(Partial {
                    frequency,
                    amplitude,
                    envelope: DecayEnvelope::new(tau),
                });
            }
        }

        let norm = normalization_gain(&partials)?;
        Ok(Self { partials, norm })
    }

    /// As `build_with_rng`, drawing jitter from the thread rng.
    pub fn build(request: &ChordRequest, params: &SynthParams) -> Result<Self, SynthError> {
        Self::build_with_rng(request, params, &mut rand::rng())
    }

    pub fn len(&self) -> usize {
        self.partials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partials.is_empty()
    }
}

/// The in-phase sum of all partials is bounded by the amplitude sum, so
/// TARGET_PEAK / sum caps the output below the clipping range.
fn normalization_gain(partials: &[Partial]) -> Result<f64, SynthError> {
    let total: f64 = partials.iter().map(|p| p.amplitude).sum();
    if !(total > 0.0) || !total.is_finite() {
        return Err(SynthError::NumericDomain(format!(
            "cannot normalize a partial bank with amplitude sum {}",
            total
        )));
    }
    Ok(TARGET_PEAK / total)
}
