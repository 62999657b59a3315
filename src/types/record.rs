//! Interaction memory records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Signature;

/// One stored pattern
///
/// Owned by the pattern store; everything handed out is a snapshot copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// Store-local creation sequence, starting at 1
    pub id: u64,
    /// Key derived from the normalised input
    pub fingerprint: String,
    /// Ordinal of the first interaction that reinforced this record
    pub first_seen_at: Option<u64>,
    /// Ordinal of the most recent interaction that reinforced this record
    pub last_seen_at: Option<u64>,
    pub occurrence_count: u64,
    pub last_signature: Option<Signature>,
    /// Monotonically non-decreasing importance weight
    pub weight: f64,
    /// Normalised input kept for similarity comparisons
    pub representative_input: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InteractionRecord {
    /// Fresh record: zero occurrences, baseline weight
    pub fn new(
        id: u64,
        fingerprint: impl Into<String>,
        representative_input: impl Into<String>,
        baseline_weight: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            fingerprint: fingerprint.into(),
            first_seen_at: None,
            last_seen_at: None,
            occurrence_count: 0,
            last_signature: None,
            weight: baseline_weight,
            representative_input: representative_input.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply one interaction to this record
    ///
    /// Failure never lowers the weight.
    pub fn reinforce(&mut self, signature: Signature, success: bool, increment: f64, interaction: u64) {
        self.occurrence_count = self.occurrence_count.saturating_add(1);
        self.last_signature = Some(signature);
        if success {
            self.weight += increment.max(0.0);
        }
        if self.first_seen_at.is_none() {
            self.first_seen_at = Some(interaction);
        }
        self.last_seen_at = Some(interaction);
        self.updated_at = Utc::now();
    }
}

/// Result of a pattern store lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lookup {
    /// Snapshot of the matched or newly created record
    pub record: InteractionRecord,
    /// True when no existing record matched
    pub created: bool,
    /// Similarity score of a fuzzy match (1.0 for exact or new)
    pub similarity: f64,
}

/// Aggregate view over the pattern store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total_records: usize,
    pub total_occurrences: u64,
    pub avg_weight: f64,
    pub max_weight: f64,
}
