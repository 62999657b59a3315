//! Transform engine: EDU(A,X) = (A/255·π), (406.4/X)
//!
//! Stateless and total over amplitude (clamped into [0, 255]); the only
//! rejected input is a zero or non-finite frequency.

use std::f64::consts::PI;

use crate::error::{Error, Result};
use crate::types::Signature;
use crate::{AMPLITUDE_MAX, FORMULA, SCALING_CONSTANT};

/// Pure EDU transform
#[derive(Debug, Default, Clone, Copy)]
pub struct TransformEngine;

impl TransformEngine {
    /// Create new engine
    pub fn new() -> Self {
        Self
    }

    /// Compute the signature for one (amplitude, frequency) pair
    pub fn compute(&self, amplitude: f64, frequency: f64) -> Result<Signature> {
        if frequency == 0.0 || !frequency.is_finite() {
            return Err(Error::InvalidFrequency { frequency });
        }

        let amplitude = clamp_amplitude(amplitude);
        let modulation = (amplitude / AMPLITUDE_MAX) * PI;
        let scaling = SCALING_CONSTANT / frequency;

        Ok(Signature::new(modulation, scaling))
    }

    /// Compute many pairs; stops at the first invalid one
    pub fn compute_batch(&self, pairs: &[(f64, f64)]) -> Result<Vec<Signature>> {
        pairs
            .iter()
            .map(|&(amplitude, frequency)| self.compute(amplitude, frequency))
            .collect()
    }

    /// Just the combined value
    pub fn combined(&self, amplitude: f64, frequency: f64) -> Result<f64> {
        Ok(self.compute(amplitude, frequency)?.combined())
    }

    pub fn formula(&self) -> &'static str {
        FORMULA
    }
}

/// Standalone transform, returning the raw `(modulation, scaling)` pair
pub fn compute(amplitude: f64, frequency: f64) -> Result<(f64, f64)> {
    TransformEngine.compute(amplitude, frequency).map(|sig| sig.pair())
}

/// Clamp into [0, 255]; NaN maps to 0
fn clamp_amplitude(amplitude: f64) -> f64 {
    if amplitude.is_nan() {
        0.0
    } else {
        amplitude.clamp(0.0, AMPLITUDE_MAX)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_point() {
        let sig = TransformEngine::new().compute(128.0, 10.0).unwrap();
        assert!((sig.modulation() - (128.0 / 255.0) * PI).abs() < 1e-12);
        assert!((sig.modulation() - 1.577).abs() < 1e-3);
        assert!((sig.scaling() - 40.64).abs() < 1e-12);
        assert!((sig.combined() - 64.09).abs() < 0.05);
    }

    #[test]
    fn test_zero_frequency_rejected() {
        let err = TransformEngine::new().compute(100.0, 0.0).unwrap_err();
        assert!(matches!(err, Error::InvalidFrequency { frequency } if frequency == 0.0));
    }

    #[test]
    fn test_non_finite_frequency_rejected() {
        let engine = TransformEngine::new();
        assert!(engine.compute(1.0, f64::NAN).is_err());
        assert!(engine.compute(1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_amplitude_is_clamped() {
        let engine = TransformEngine::new();
        let high = engine.compute(1000.0, 1.0).unwrap();
        let max = engine.compute(255.0, 1.0).unwrap();
        let low = engine.compute(-20.0, 1.0).unwrap();
        assert_eq!(high, max);
        assert_eq!(low.modulation(), 0.0);
        assert!((max.modulation() - PI).abs() < 1e-12);
        assert_eq!(engine.compute(f64::NAN, 1.0).unwrap().modulation(), 0.0);
    }

    #[test]
    fn test_negative_frequency_allowed() {
        let sig = TransformEngine::new().compute(255.0, -4.0).unwrap();
        assert!((sig.scaling() + 101.6).abs() < 1e-12);
    }

    #[test]
    fn test_determinism() {
        let engine = TransformEngine::new();
        for a in [0.0, 1.0, 63.5, 128.0, 254.9, 255.0] {
            for x in [0.001, 1.0, 10.0, 440.0, 2.4e9] {
                let s1 = engine.compute(a, x).unwrap();
                let s2 = engine.compute(a, x).unwrap();
                assert_eq!(s1.modulation().to_bits(), s2.modulation().to_bits());
                assert_eq!(s1.scaling().to_bits(), s2.scaling().to_bits());
            }
        }
    }

    #[test]
    fn test_formula_identities() {
        let engine = TransformEngine::new();
        for a in (0..=255).step_by(17) {
            let a = a as f64;
            let sig = engine.compute(a, 3.0).unwrap();
            assert!((sig.modulation() - a / 255.0 * PI).abs() < 1e-12);
        }
        for x in [0.5, 2.0, 144.0, 1e6] {
            let sig = engine.compute(10.0, x).unwrap();
            assert!((sig.scaling() - 406.4 / x).abs() < 1e-9);
        }
    }

    #[test]
    fn test_batch_stops_on_invalid() {
        let engine = TransformEngine::new();
        let ok = engine.compute_batch(&[(128.0, 440.0), (255.0, 10.0)]).unwrap();
        assert_eq!(ok.len(), 2);
        assert!(engine.compute_batch(&[(128.0, 440.0), (1.0, 0.0)]).is_err());
    }

    #[test]
    fn test_free_function_returns_pair() {
        let (m, s) = compute(255.0, 406.4).unwrap();
        assert!((m - PI).abs() < 1e-12);
        assert!((s - 1.0).abs() < 1e-12);
    }
}
