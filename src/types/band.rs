//! Classification bands

use serde::{Deserialize, Serialize};

use crate::{BAND_HIGH_ENERGY_ABOVE, BAND_MODERATE_ABOVE, BAND_SIMPLE_ABOVE};

/// Response band of a combined EDU value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Band {
    /// combined <= 1
    Minimal,
    /// 1 < combined <= 10
    Simple,
    /// 10 < combined <= 100
    Moderate,
    /// combined > 100
    HighEnergy,
}

impl Band {
    pub const ALL: [Band; 4] = [Band::Minimal, Band::Simple, Band::Moderate, Band::HighEnergy];

    /// Classify a combined value. NaN falls into `Minimal`.
    pub fn classify(combined: f64) -> Self {
        if combined > BAND_HIGH_ENERGY_ABOVE {
            Band::HighEnergy
        } else if combined > BAND_MODERATE_ABOVE {
            Band::Moderate
        } else if combined > BAND_SIMPLE_ABOVE {
            Band::Simple
        } else {
            Band::Minimal
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Band::Minimal => "🔍",
            Band::Simple => "💭",
            Band::Moderate => "🤔",
            Band::HighEnergy => "🧠",
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Band::Minimal => "MINIMAL",
            Band::Simple => "SIMPLE",
            Band::Moderate => "MODERATE",
            Band::HighEnergy => "HIGH_ENERGY",
        };
        write!(f, "{}", name)
    }
}

/// EEG-style frequency band, used when the frequency proxy is in Hz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeuralBand {
    Delta,
    Theta,
    Alpha,
    Beta,
    Gamma,
    Unknown,
}

impl NeuralBand {
    /// Half-open `[low, high)` ranges in Hz
    const RANGES: [(NeuralBand, f64, f64); 5] = [
        (NeuralBand::Delta, 0.5, 4.0),
        (NeuralBand::Theta, 4.0, 8.0),
        (NeuralBand::Alpha, 8.0, 13.0),
        (NeuralBand::Beta, 13.0, 30.0),
        (NeuralBand::Gamma, 30.0, 100.0),
    ];

    pub fn classify(frequency: f64) -> Self {
        Self::RANGES
            .iter()
            .find(|(_, low, high)| (*low..*high).contains(&frequency))
            .map(|(band, _, _)| *band)
            .unwrap_or(NeuralBand::Unknown)
    }
}
