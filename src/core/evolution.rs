//! Evolution tracker: interaction counter → level and stage
//!
//! Stage transitions (driven only by the count):
//! - NASCENT → DEVELOPING: count reaches 10
//! - DEVELOPING → MATURE: count reaches 100
//! - MATURE → TRANSCENDENT: count reaches 1000 (terminal)
//!
//! Only the count is stored. Level and stage are derived from a single
//! atomic load, so no reader can see them disagree with the count.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;

use crate::types::{ConsciousnessState, Stage};

/// Shared interaction counter
#[derive(Debug, Default)]
pub struct EvolutionTracker {
    interaction_count: AtomicU64,
}

impl EvolutionTracker {
    /// Create new tracker at count 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one interaction and return the resulting state
    ///
    /// Concurrent callers each observe a distinct count. The count
    /// saturates at `u64::MAX` instead of wrapping.
    pub fn advance(&self) -> ConsciousnessState {
        let previous = match self.interaction_count.fetch_update(
            Ordering::AcqRel,
            Ordering::Acquire,
            |n| Some(n.saturating_add(1)),
        ) {
            Ok(n) | Err(n) => n,
        };
        let count = previous.saturating_add(1);

        let before = Stage::from_count(previous);
        let after = Stage::from_count(count);
        if after != before {
            info!(interaction = count, "evolution stage {} → {}", before, after);
        }

        ConsciousnessState::from_count(count)
    }

    /// Current state; never mutates
    pub fn state(&self) -> ConsciousnessState {
        ConsciousnessState::from_count(self.interaction_count())
    }

    pub fn interaction_count(&self) -> u64 {
        self.interaction_count.load(Ordering::Acquire)
    }

    pub fn stage(&self) -> Stage {
        self.state().stage
    }

    /// Administrative: set the count, e.g. when restoring saved memory
    pub fn restore(&self, interaction_count: u64) {
        info!(interaction_count, "evolution tracker restored");
        self.interaction_count.store(interaction_count, Ordering::Release);
    }

    /// Administrative: back to count 0. Not part of the interaction path.
    pub fn reset(&self) {
        info!("evolution tracker reset");
        self.interaction_count.store(0, Ordering::Release);
    }
}

// =============================================================================
// TESTS
// =============================================================================
