//! Raw input and extracted features

use serde::{Deserialize, Serialize};

/// Raw input to one interaction
#[derive(Debug, Clone, PartialEq)]
pub enum Stimulus {
    /// Free text, e.g. a chat line
    Text(String),
    /// Sampled signal with its rate in Hz
    Signal { samples: Vec<f64>, sampling_rate: f64 },
}

impl Stimulus {
    pub fn text(text: impl Into<String>) -> Self {
        Stimulus::Text(text.into())
    }

    pub fn signal(samples: Vec<f64>, sampling_rate: f64) -> Self {
        Stimulus::Signal {
            samples,
            sampling_rate,
        }
    }
}

impl From<&str> for Stimulus {
    fn from(text: &str) -> Self {
        Stimulus::Text(text.to_string())
    }
}

impl From<String> for Stimulus {
    fn from(text: String) -> Self {
        Stimulus::Text(text)
    }
}

/// Keyword density per emotion (each 0.0-1.0)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionProfile {
    pub joy: f64,
    pub curiosity: f64,
    pub concern: f64,
    pub excitement: f64,
}

impl EmotionProfile {
    /// Strongest emotion, if any keyword hit at all
    pub fn dominant(&self) -> Option<&'static str> {
        let scores = [
            ("joy", self.joy),
            ("curiosity", self.curiosity),
            ("concern", self.concern),
            ("excitement", self.excitement),
        ];
        scores
            .iter()
            .filter(|(_, score)| *score > 0.0)
            .fold(None, |best: Option<(&'static str, f64)>, &(name, score)| match best {
                Some((_, top)) if top >= score => best,
                _ => Some((name, score)),
            })
            .map(|(name, _)| name)
    }
}

/// Everything the pipeline derives from a stimulus before touching state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Features {
    /// Amplitude proxy, already in [0, 255]
    pub amplitude: f64,
    /// Frequency proxy, non-zero
    pub frequency: f64,
    /// Pattern store key
    pub fingerprint: String,
    /// Normalised form kept as the record's representative input
    pub representative: String,
    /// Words (text) or samples (signal)
    pub unit_count: usize,
    pub emotions: EmotionProfile,
    /// How strongly the input asks for creativity (0.0-1.0)
    pub creativity: f64,
}
