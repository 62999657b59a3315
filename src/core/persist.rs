//! Memory snapshots: save and restore a mind as JSON
//!
//! The core itself is in-memory only; this is the optional collaborator
//! that carries the pattern store and interaction count across restarts.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::config::MindConfig;
use crate::core::mind::Mind;
use crate::error::{Error, Result};
use crate::types::InteractionRecord;

/// Current snapshot layout version
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub interaction_count: u64,
    pub records: Vec<InteractionRecord>,
    /// SHA-256 hex over the count and each record's id, fingerprint and occurrences
    pub checksum: String,
}

impl MemorySnapshot {
    /// Capture the current state of a mind
    pub fn capture(mind: &Mind) -> Self {
        let interaction_count = mind.state().interaction_count;
        let records = mind.memory().records();
        let checksum = checksum(interaction_count, &records);
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            interaction_count,
            records,
            checksum,
        }
    }

    /// Check version, checksum, fingerprint uniqueness and record bounds
    ///
    /// The checksum catches accidental damage only; anyone can recompute
    /// it, so counts and weights are range-checked as well.
    pub fn validate(&self) -> Result<()> {
        if self.version != SNAPSHOT_VERSION {
            return Err(Error::Snapshot(format!(
                "unsupported version {} (expected {})",
                self.version, SNAPSHOT_VERSION
            )));
        }
        if checksum(self.interaction_count, &self.records) != self.checksum {
            return Err(Error::Snapshot("checksum mismatch".into()));
        }
        let mut seen = std::collections::HashSet::new();
        if let Some(dup) = self.records.iter().find(|r| !seen.insert(r.fingerprint.as_str())) {
            return Err(Error::Snapshot(format!("duplicate fingerprint {}", dup.fingerprint)));
        }
        if self.interaction_count == u64::MAX {
            return Err(Error::Snapshot("interaction count out of range".into()));
        }
        for record in &self.records {
            if record.occurrence_count > self.interaction_count {
                return Err(Error::Snapshot(format!(
                    "record {} has {} occurrences but only {} interactions were recorded",
                    record.id, record.occurrence_count, self.interaction_count
                )));
            }
            if !(record.weight.is_finite() && record.weight >= 0.0) {
                return Err(Error::Snapshot(format!(
                    "record {} has invalid weight {}",
                    record.id, record.weight
                )));
            }
        }
        Ok(())
    }

    /// Weights below the baseline would mean a restore lowered them
    fn check_baseline(&self, baseline_weight: f64) -> Result<()> {
        match self.records.iter().find(|r| r.weight < baseline_weight) {
            Some(record) => Err(Error::Snapshot(format!(
                "record {} weight {} is below baseline {}",
                record.id, record.weight, baseline_weight
            ))),
            None => Ok(()),
        }
    }

    /// Load this snapshot into a mind, replacing its memory and count
    pub fn restore_into(&self, mind: &Mind) -> Result<()> {
        self.validate()?;
        self.check_baseline(mind.config().memory.baseline_weight)?;
        mind.memory().restore(self.records.clone())?;
        mind.evolution().restore(self.interaction_count);
        Ok(())
    }
}

/// Save a mind to a JSON file, creating parent directories
pub fn save_memory(mind: &Mind, path: impl AsRef<Path>) -> Result<MemorySnapshot> {
    let path = path.as_ref();
    let snapshot = MemorySnapshot::capture(mind);
    let json = serde_json::to_string_pretty(&snapshot)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, json)?;

    info!(
        path = %path.display(),
        records = snapshot.records.len(),
        interactions = snapshot.interaction_count,
        "memory saved"
    );
    Ok(snapshot)
}

/// Read and validate a snapshot file
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<MemorySnapshot> {
    let json = std::fs::read_to_string(path)?;
    let snapshot: MemorySnapshot = serde_json::from_str(&json)?;
    snapshot.validate()?;
    Ok(snapshot)
}

/// Build a mind from a snapshot file
pub fn load_memory(path: impl AsRef<Path>, config: MindConfig) -> Result<Mind> {
    let path = path.as_ref();
    let snapshot = load_snapshot(path)?;
    let mind = Mind::with_config(config)?;
    snapshot.restore_into(&mind)?;
    info!(
        path = %path.display(),
        records = snapshot.records.len(),
        interactions = snapshot.interaction_count,
        "memory loaded"
    );
    Ok(mind)
}

fn checksum(interaction_count: u64, records: &[InteractionRecord]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(interaction_count.to_le_bytes());
    for record in records {
        hasher.update(record.id.to_le_bytes());
        hasher.update(record.fingerprint.as_bytes());
        hasher.update(record.occurrence_count.to_le_bytes());
    }
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
