//! Feature extraction: stimulus → amplitude/frequency proxies + fingerprint
//!
//! Text: amplitude = normalised length (max 255), frequency = distinct words.
//! Signal: amplitude = peak × 255, frequency = zero-crossing rate in Hz.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::types::{EmotionProfile, Features, Stimulus};
use crate::AMPLITUDE_MAX;

lazy_static! {
    // =========================================================================
    // Emotion keywords (6 each; score = distinct hits / 6)
    // =========================================================================
    static ref RE_JOY: Regex = Regex::new(
        r"(?i)\b(happy|great|awesome|wonderful|fantastic|love)\b"
    ).unwrap();

    static ref RE_CURIOSITY: Regex = Regex::new(
        r"(?i)\b(how|why|what|explain|tell me|learn)\b"
    ).unwrap();

    static ref RE_CONCERN: Regex = Regex::new(
        r"(?i)\b(worried|problem|issue|help|trouble|difficult)\b"
    ).unwrap();

    static ref RE_EXCITEMENT: Regex = Regex::new(
        r"(?i)\b(amazing|incredible|wow|unbelievable|revolutionary)\b|!"
    ).unwrap();

    // =========================================================================
    // Creativity indicators (score = distinct hits / 3, capped at 1)
    // =========================================================================
    static ref RE_CREATIVITY: Regex = Regex::new(
        r"(?i)\b(create|imagine|design|invent|think of|come up with|brainstorm|innovative|original|unique|creative)\b"
    ).unwrap();
}

const EMOTION_KEYWORDS: f64 = 6.0;
const CREATIVITY_SATURATION: f64 = 3.0;

/// Samples are quantised to this resolution before fingerprinting
const SIGNAL_QUANTUM: f64 = 1e6;

/// Feature extractor
#[derive(Debug, Default, Clone, Copy)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Create new extractor
    pub fn new() -> Self {
        Self
    }

    /// Derive features, or fail with `MalformedInput`
    pub fn extract(&self, stimulus: &Stimulus) -> Result<Features> {
        match stimulus {
            Stimulus::Text(text) => self.extract_text(text),
            Stimulus::Signal {
                samples,
                sampling_rate,
            } => self.extract_signal(samples, *sampling_rate),
        }
    }

    fn extract_text(&self, text: &str) -> Result<Features> {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return Err(Error::malformed("empty text"));
        }

        let distinct: HashSet<&str> = normalized.split(' ').collect();
        let word_count = normalized.split(' ').count();

        let amplitude = (normalized.chars().count() as f64).min(AMPLITUDE_MAX);
        let frequency = distinct.len() as f64;

        Ok(Features {
            amplitude,
            frequency,
            fingerprint: fingerprint_text(&normalized),
            representative: normalized.clone(),
            unit_count: word_count,
            emotions: detect_emotions(&normalized),
            creativity: (distinct_hits(&RE_CREATIVITY, &normalized) / CREATIVITY_SATURATION).min(1.0),
        })
    }

    fn extract_signal(&self, samples: &[f64], sampling_rate: f64) -> Result<Features> {
        if samples.is_empty() {
            return Err(Error::malformed("empty signal"));
        }
        if !(sampling_rate.is_finite() && sampling_rate > 0.0) {
            return Err(Error::malformed(format!("invalid sampling rate {}", sampling_rate)));
        }
        if samples.iter().any(|s| !s.is_finite()) {
            return Err(Error::malformed("signal contains non-finite samples"));
        }

        let peak = samples.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()));
        let crossings = samples
            .windows(2)
            .filter(|w| (w[0] < 0.0) != (w[1] < 0.0))
            .count();
        if crossings == 0 {
            return Err(Error::malformed("signal has no zero crossings"));
        }

        let duration_samples = (samples.len() - 1) as f64;
        let frequency = crossings as f64 * sampling_rate / (2.0 * duration_samples);
        let amplitude = (peak * AMPLITUDE_MAX).min(AMPLITUDE_MAX);

        Ok(Features {
            amplitude,
            frequency,
            fingerprint: fingerprint_signal(samples, sampling_rate),
            representative: format!(
                "signal samples:{} rate:{} peak:{:.3} freq:{:.3}",
                samples.len(),
                sampling_rate,
                peak,
                frequency
            ),
            unit_count: samples.len(),
            emotions: EmotionProfile::default(),
            creativity: 0.0,
        })
    }
}

/// Lower-case and collapse whitespace
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// SHA-256 hex of normalised text
pub fn fingerprint_text(normalized: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"text:");
    hasher.update(normalized.as_bytes());
    hex(&hasher.finalize())
}

fn fingerprint_signal(samples: &[f64], sampling_rate: f64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"signal:");
    hasher.update(sampling_rate.to_le_bytes());
    for s in samples {
        hasher.update(((s * SIGNAL_QUANTUM).round() as i64).to_le_bytes());
    }
    hex(&hasher.finalize())
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn detect_emotions(text: &str) -> EmotionProfile {
    let score = |re: &Regex| (distinct_hits(re, text) / EMOTION_KEYWORDS).min(1.0);
    EmotionProfile {
        joy: score(&RE_JOY),
        curiosity: score(&RE_CURIOSITY),
        concern: score(&RE_CONCERN),
        excitement: score(&RE_EXCITEMENT),
    }
}

/// Number of distinct keywords matched
fn distinct_hits(regex: &Regex, text: &str) -> f64 {
    regex
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect::<HashSet<_>>()
        .len() as f64
}

// =============================================================================
// TESTS
// =============================================================================
