//! Output structures for terminal display and API responses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Band, Features, InteractionRecord, Signature, Stage};

/// Rendered response for one interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub band: Band,
    pub stage: Stage,
    pub text: String,
}

/// Full result of one interaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionOutcome {
    pub timestamp: DateTime<Utc>,
    pub response: String,
    pub band: Band,
    pub signature: Signature,
    pub stage: Stage,
    pub level: f64,
    /// Distinct records in the pattern store after this interaction
    pub memory_count: usize,
    /// Ordinal of this interaction
    pub interaction_count: u64,
    /// True when this interaction moved the tracker into a new stage
    pub stage_changed: bool,
    /// True when this interaction created its record
    pub new_pattern: bool,
    pub record: InteractionRecord,
    pub features: Features,
}

impl InteractionOutcome {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.stage.color_code();
        let reset = Stage::color_reset();

        format!(
            "{}{} {} | combined={:.2} | stage={} | level={:.1} | memory={} | weight={:.2}{}",
            color,
            self.band.emoji(),
            self.band,
            self.signature.combined(),
            self.stage,
            self.level,
            self.memory_count,
            self.record.weight,
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "band={} | modulation={:.4} | scaling={:.4} | combined={:.4} | stage={} | level={:.1} | memory={} | count={}",
            self.band,
            self.signature.modulation(),
            self.signature.scaling(),
            self.signature.combined(),
            self.stage,
            self.level,
            self.memory_count,
            self.interaction_count
        )
    }
}
