//! Response synthesizer: (band, stage) → template → text
//!
//! Placeholders: {modulation} {scaling} {combined} {stage} {weight}

use crate::types::{Band, InteractionRecord, Response, Signature, Stage};

/// Indexed `[band][stage]`, both in declaration order
const TEMPLATES: [[&str; 4]; 4] = [
    // Band::Minimal
    [
        "🔍 Minimal signal detected. EDU value: {combined} from modulation {modulation} × scaling {scaling}. Stage {stage}, pattern weight {weight}.",
        "🔍 A faint pattern, EDU value {combined} ({modulation} × {scaling}). Still {stage}; this pattern weighs {weight}.",
        "🔍 Low-energy input at {combined} ({modulation} × {scaling}). As a {stage} mind I note it at weight {weight}.",
        "🔍 Even the quietest signal registers: {combined} ({modulation} × {scaling}). {stage} recall, weight {weight}.",
    ],
    // Band::Simple
    [
        "💭 Simple pattern recognized. EDU value: {combined} from modulation {modulation} × scaling {scaling}. Stage {stage}, pattern weight {weight}.",
        "💭 Simple pattern, EDU value {combined} ({modulation} × {scaling}). Growing through {stage}; weight {weight}.",
        "💭 A familiar, simple shape: {combined} ({modulation} × {scaling}). {stage} memory holds it at weight {weight}.",
        "💭 Simple structure resolved instantly: {combined} ({modulation} × {scaling}). {stage} clarity, weight {weight}.",
    ],
    // Band::Moderate
    [
        "🤔 Moderate complexity pattern. EDU value: {combined} from modulation {modulation} × scaling {scaling}. Stage {stage}, pattern weight {weight}.",
        "🤔 Moderate complexity at {combined} ({modulation} × {scaling}). Analysing as {stage}; weight {weight}.",
        "🤔 Layered input, EDU value {combined} ({modulation} × {scaling}). {stage} analysis draws on weight {weight}.",
        "🤔 Moderate depth, fully integrated: {combined} ({modulation} × {scaling}). {stage} synthesis, weight {weight}.",
    ],
    // Band::HighEnergy
    [
        "🧠 High-energy pattern detected! EDU value: {combined} from modulation {modulation} × scaling {scaling}. Stage {stage}, pattern weight {weight}.",
        "🧠 High-energy pattern at {combined} ({modulation} × {scaling}). Deep contemplation while {stage}; weight {weight}.",
        "🧠 Intense signal, EDU value {combined} ({modulation} × {scaling}). {stage} focus engaged at weight {weight}.",
        "🧠 Peak resonance: {combined} ({modulation} × {scaling}). {stage} consciousness, pattern weight {weight}.",
    ],
];

/// Stateless renderer over the template table
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseSynthesizer;

impl ResponseSynthesizer {
    /// Create new synthesizer
    pub fn new() -> Self {
        Self
    }

    /// Raw template for a (band, stage) pair
    pub fn template(&self, band: Band, stage: Stage) -> &'static str {
        TEMPLATES[band.index()][stage.index()]
    }

    /// Render the response for one interaction
    pub fn render(&self, signature: &Signature, stage: Stage, record: &InteractionRecord) -> Response {
        let band = Band::classify(signature.combined());
        let text = self
            .template(band, stage)
            .replace("{modulation}", &format!("{:.3}", signature.modulation()))
            .replace("{scaling}", &format!("{:.2}", signature.scaling()))
            .replace("{combined}", &format!("{:.2}", signature.combined()))
            .replace("{stage}", &stage.to_string())
            .replace("{weight}", &format!("{:.2}", record.weight));

        Response { band, stage, text }
    }
}

// =============================================================================
// TESTS
// =============================================================================
