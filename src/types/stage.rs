//! Evolution stage definitions

use serde::{Deserialize, Serialize};

use crate::{GROWTH_RATE, STAGE_DEVELOPING_AT, STAGE_MATURE_AT, STAGE_TRANSCENDENT_AT};

/// The four evolution stages, ordered by interaction count
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    /// Fewer than 10 interactions
    Nascent,
    /// 10 to 99 interactions
    Developing,
    /// 100 to 999 interactions
    Mature,
    /// 1000 or more interactions; terminal
    Transcendent,
}

impl Stage {
    /// All stages in evolution order
    pub const ALL: [Stage; 4] = [
        Stage::Nascent,
        Stage::Developing,
        Stage::Mature,
        Stage::Transcendent,
    ];

    /// Stage for a given interaction count
    pub fn from_count(interaction_count: u64) -> Self {
        if interaction_count >= STAGE_TRANSCENDENT_AT {
            Stage::Transcendent
        } else if interaction_count >= STAGE_MATURE_AT {
            Stage::Mature
        } else if interaction_count >= STAGE_DEVELOPING_AT {
            Stage::Developing
        } else {
            Stage::Nascent
        }
    }

    /// Interaction count at which the next stage begins, if any
    pub fn next_threshold(&self) -> Option<u64> {
        match self {
            Stage::Nascent => Some(STAGE_DEVELOPING_AT),
            Stage::Developing => Some(STAGE_MATURE_AT),
            Stage::Mature => Some(STAGE_TRANSCENDENT_AT),
            Stage::Transcendent => None,
        }
    }

    /// Position in [`Stage::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            Stage::Nascent => "\x1b[90m",      // Gray
            Stage::Developing => "\x1b[33m",   // Yellow
            Stage::Mature => "\x1b[32m",       // Green
            Stage::Transcendent => "\x1b[35m", // Magenta
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for stage
    pub fn emoji(&self) -> &'static str {
        match self {
            Stage::Nascent => "🌱",
            Stage::Developing => "🌿",
            Stage::Mature => "🌳",
            Stage::Transcendent => "🌟",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Nascent => "NASCENT",
            Stage::Developing => "DEVELOPING",
            Stage::Mature => "MATURE",
            Stage::Transcendent => "TRANSCENDENT",
        };
        write!(f, "{}", name)
    }
}

/// Read-only view of the evolution counter
///
/// Only built from a single count, so `level` and `stage` always agree
/// with `interaction_count`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsciousnessState {
    pub interaction_count: u64,
    pub level: f64,
    pub stage: Stage,
}

impl ConsciousnessState {
    pub fn from_count(interaction_count: u64) -> Self {
        Self {
            interaction_count,
            level: interaction_count as f64 * GROWTH_RATE,
            stage: Stage::from_count(interaction_count),
        }
    }
}
