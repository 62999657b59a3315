//! Mind: owned context running the interaction pipeline
//!
//! stimulus → extract → compute → lookup_or_create → advance → reinforce → render
//!
//! Extraction and the transform run before anything shared is touched, so
//! a rejected input leaves the tracker and the store exactly as they were.

use chrono::Utc;
use tracing::debug;

use crate::config::MindConfig;
use crate::core::evolution::EvolutionTracker;
use crate::core::features::FeatureExtractor;
use crate::core::memory::PatternStore;
use crate::core::similarity::SimilarityPolicy;
use crate::core::synth::ResponseSynthesizer;
use crate::core::transform::TransformEngine;
use crate::error::Result;
use crate::types::{ConsciousnessState, InteractionOutcome, MemoryStats, Signature, Stage, Stimulus};

#[derive(Debug)]
pub struct Mind {
    config: MindConfig,
    extractor: FeatureExtractor,
    transform: TransformEngine,
    memory: PatternStore,
    evolution: EvolutionTracker,
    synthesizer: ResponseSynthesizer,
}

impl Default for Mind {
    fn default() -> Self {
        Self::build(MindConfig::default(), None)
    }
}

impl Mind {
    /// Fresh mind with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh mind with a validated configuration
    pub fn with_config(config: MindConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, None))
    }

    /// Fresh mind using a custom similarity policy instead of the configured one
    pub fn with_similarity(config: MindConfig, policy: Box<dyn SimilarityPolicy>) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, Some(policy)))
    }

    fn build(config: MindConfig, policy: Option<Box<dyn SimilarityPolicy>>) -> Self {
        let memory = match policy {
            Some(policy) => PatternStore::with_policy(&config.memory, policy),
            None => PatternStore::new(&config.memory),
        };
        Self {
            config,
            extractor: FeatureExtractor::new(),
            transform: TransformEngine::new(),
            memory,
            evolution: EvolutionTracker::new(),
            synthesizer: ResponseSynthesizer::new(),
        }
    }

    /// Raw transform, no state involved
    pub fn compute(&self, amplitude: f64, frequency: f64) -> Result<Signature> {
        self.transform.compute(amplitude, frequency)
    }

    /// Run one successful interaction
    pub fn interact(&self, stimulus: impl Into<Stimulus>) -> Result<InteractionOutcome> {
        self.interact_with(stimulus, true)
    }

    /// Run one interaction with an explicit success signal for reinforcement
    pub fn interact_with(&self, stimulus: impl Into<Stimulus>, success: bool) -> Result<InteractionOutcome> {
        let stimulus = stimulus.into();

        // Stateless phase: any failure here aborts with nothing mutated
        let features = self.extractor.extract(&stimulus)?;
        let signature = self.transform.compute(features.amplitude, features.frequency)?;

        // Stateful phase
        let lookup = self
            .memory
            .lookup_or_create(&features.fingerprint, &features.representative)?;
        let state = self.evolution.advance();
        let record = self.memory.reinforce(
            &lookup.record.fingerprint,
            signature,
            success,
            state.interaction_count,
        )?;

        let response = self.synthesizer.render(&signature, state.stage, &record);
        let stage_changed = state.stage != Stage::from_count(state.interaction_count - 1);

        debug!(
            interaction = state.interaction_count,
            fingerprint = %record.fingerprint,
            band = %response.band,
            combined = signature.combined(),
            new_pattern = lookup.created,
            "interaction processed"
        );

        Ok(InteractionOutcome {
            timestamp: Utc::now(),
            response: response.text,
            band: response.band,
            signature,
            stage: state.stage,
            level: state.level,
            memory_count: self.memory.len(),
            interaction_count: state.interaction_count,
            stage_changed,
            new_pattern: lookup.created,
            record,
            features,
        })
    }

    /// Read-only status
    pub fn state(&self) -> ConsciousnessState {
        self.evolution.state()
    }

    pub fn memory_stats(&self) -> MemoryStats {
        self.memory.stats()
    }

    pub fn memory(&self) -> &PatternStore {
        &self.memory
    }

    pub fn evolution(&self) -> &EvolutionTracker {
        &self.evolution
    }

    pub fn config(&self) -> &MindConfig {
        &self.config
    }

    pub fn formula(&self) -> &'static str {
        self.transform.formula()
    }

    /// Administrative: forget everything and return to count 0
    pub fn reset(&self) {
        self.memory.clear();
        self.evolution.reset();
    }
}

// =============================================================================
// TESTS
// =============================================================================
