//! EDU-AI: deterministic EDU transform with interaction memory
//!
//! Pipeline: stimulus → FeatureExtractor → TransformEngine → PatternStore
//! → EvolutionTracker → ResponseSynthesizer

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use config::MindConfig;
pub use core::Mind;
pub use error::{Error, Result};

// =============================================================================
// TRANSFORM CONSTANTS - EDU(A,X) = (A/255·π), (406.4/X)
// =============================================================================

/// Upper bound of the amplitude domain; amplitudes are clamped into [0, 255]
pub const AMPLITUDE_MAX: f64 = 255.0;

/// Numerator of the scaling component (16 × 25.4)
pub const SCALING_CONSTANT: f64 = 406.4;

/// Human-readable form of the transform
pub const FORMULA: &str = "EDU(A,X) = (A/255·π), (406.4/X)";

// =============================================================================
// EVOLUTION THRESHOLDS
// =============================================================================

/// level = interaction_count * GROWTH_RATE
pub const GROWTH_RATE: f64 = 0.1;

/// Interaction count at which Nascent becomes Developing
pub const STAGE_DEVELOPING_AT: u64 = 10;

/// Interaction count at which Developing becomes Mature
pub const STAGE_MATURE_AT: u64 = 100;

/// Interaction count at which Mature becomes Transcendent
pub const STAGE_TRANSCENDENT_AT: u64 = 1000;

// =============================================================================
// RESPONSE BANDS - lower bounds (exclusive) on the combined value
// =============================================================================

pub const BAND_SIMPLE_ABOVE: f64 = 1.0;
pub const BAND_MODERATE_ABOVE: f64 = 10.0;
pub const BAND_HIGH_ENERGY_ABOVE: f64 = 100.0;

// =============================================================================
// MEMORY DEFAULTS
// =============================================================================

/// Weight of a freshly created record
pub const DEFAULT_BASELINE_WEIGHT: f64 = 1.0;

/// Weight added on every successful reinforcement
pub const DEFAULT_WEIGHT_INCREMENT: f64 = 0.1;

/// Jaccard overlap needed for two inputs to count as the same pattern
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
