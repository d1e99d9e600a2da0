use super::error::SynthError;
use super::params::SynthParams;

/// Power-law stretch model for string-like spectra:
/// B(f) = B0 * (f / f0)^beta.
///
/// Pure and deterministic; B0 = 0 disables stretching entirely.
#[derive(Debug, Clone, Copy)]
pub struct InharmonicityModel {
    f0: f64,
    b0: f64,
    beta: f64,
}

impl InharmonicityModel {
    pub fn new(f0: f64, b0: f64, beta: f64) -> Self {
        Self { f0, b0, beta }
    }

    pub fn from_params(params: &SynthParams) -> Self {
        Self::new(params.f0, params.b0, params.beta)
    }

    /// Stretch coefficient for a note at `frequency` Hz. A non-positive
    /// frequency is outside the model's domain and is reported, never
    /// silently coerced.
    pub fn coefficient(&self, frequency: f64) -> Result<f64, SynthError> {
        if !(frequency > 0.0) || !frequency.is_finite() {
            return Err(SynthError::NumericDomain(format!(
                "inharmonicity model needs a positive frequency, got {}",
                frequency
            )));
        }
        Ok(self.b0 * (frequency / self.f0).powf(self.beta))
    }
}
