use std::error::Error;
use std::fmt;

/// Errors raised while turning a chord request into a partial bank.
/// All of these surface synchronously, before any audio starts.
#[derive(Debug, Clone, PartialEq)]
pub enum SynthError {
    /// A ratio expression could not be parsed, or did not evaluate to a
    /// positive finite multiplier.
    InvalidRatio { expression: String, reason: String },
    /// A parameter snapshot failed validation.
    InvalidParams(String),
    /// A formula left its numeric domain (negative radicand, zero amplitude
    /// sum). Reported instead of letting NaN reach the output.
    NumericDomain(String),
}

impl fmt::Display for SynthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthError::InvalidRatio { expression, reason } => {
                write!(f, "invalid ratio expression {:?}: {}", expression, reason)
            }
            SynthError::InvalidParams(msg) => write!(f, "invalid synth parameters: {}", msg),
            SynthError::NumericDomain(msg) => write!(f, "numeric domain error: {}", msg),
        }
    }
}

impl Error for SynthError {}
