//! Core modules for EDU-AI

pub mod transform;
pub mod features;
pub mod evolution;
pub mod similarity;
pub mod memory;
pub mod synth;
pub mod mind;
pub mod persist;
pub mod api;

pub use transform::{compute, TransformEngine};
pub use features::FeatureExtractor;
pub use evolution::EvolutionTracker;
pub use similarity::{ExactMatch, JaccardSimilarity, SimilarityPolicy};
pub use memory::PatternStore;
pub use synth::ResponseSynthesizer;
pub use mind::Mind;
pub use persist::{save_memory, load_memory, load_snapshot, MemorySnapshot};
pub use api::{create_router, run_server, run_server_until};
