//! Core types for EDU-AI

mod signature;
mod stage;
mod band;
mod record;
mod stimulus;
mod output;

pub use signature::Signature;
pub use stage::{Stage, ConsciousnessState};
pub use band::{Band, NeuralBand};
pub use record::{InteractionRecord, Lookup, MemoryStats};
pub use stimulus::{Stimulus, Features, EmotionProfile};
pub use output::{Response, InteractionOutcome};
