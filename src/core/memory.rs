//! Pattern store: one record per distinct input pattern
//!
//! Records are never evicted. Updates to one record serialize on its map
//! shard; different records update independently. An optional capacity
//! bound refuses new patterns explicitly instead of dropping old ones.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, info, warn};

use crate::config::MemoryConfig;
use crate::core::similarity::{self, SimilarityPolicy};
use crate::error::{Error, Result};
use crate::types::{InteractionRecord, Lookup, MemoryStats, Signature};

#[derive(Debug)]
pub struct PatternStore {
    records: DashMap<String, InteractionRecord>,
    similarity: Box<dyn SimilarityPolicy>,
    baseline_weight: f64,
    weight_increment: f64,
    max_records: Option<usize>,
    /// Reserved slots; kept separately so capacity checks never lock shards
    len: AtomicUsize,
    next_id: AtomicU64,
}

impl Default for PatternStore {
    fn default() -> Self {
        Self::new(&MemoryConfig::default())
    }
}

impl PatternStore {
    pub fn new(config: &MemoryConfig) -> Self {
        Self::with_policy(config, similarity::from_config(config))
    }

    /// Store with a caller-supplied similarity policy
    pub fn with_policy(config: &MemoryConfig, policy: Box<dyn SimilarityPolicy>) -> Self {
        Self {
            records: DashMap::new(),
            similarity: policy,
            baseline_weight: config.baseline_weight,
            weight_increment: config.weight_increment,
            max_records: config.max_records,
            len: AtomicUsize::new(0),
            next_id: AtomicU64::new(0),
        }
    }

    /// Find the record for this pattern, creating it if nothing matches
    ///
    /// Order: exact fingerprint, then the best similarity match (highest
    /// score, oldest record on ties), then a new record with zero
    /// occurrences and the baseline weight.
    pub fn lookup_or_create(&self, fingerprint: &str, representative_input: &str) -> Result<Lookup> {
        if let Some(existing) = self.records.get(fingerprint) {
            return Ok(Lookup {
                record: existing.clone(),
                created: false,
                similarity: 1.0,
            });
        }

        if let Some((record, score)) = self.best_similar(representative_input) {
            debug!(
                fingerprint,
                matched = %record.fingerprint,
                score,
                "similar pattern matched"
            );
            return Ok(Lookup {
                record,
                created: false,
                similarity: score,
            });
        }

        match self.records.entry(fingerprint.to_string()) {
            // Another caller created it between our read and this write
            Entry::Occupied(entry) => Ok(Lookup {
                record: entry.get().clone(),
                created: false,
                similarity: 1.0,
            }),
            Entry::Vacant(entry) => {
                self.reserve_slot()?;
                let id = self.next_id.fetch_add(1, Ordering::AcqRel) + 1;
                let record = InteractionRecord::new(
                    id,
                    fingerprint,
                    representative_input,
                    self.baseline_weight,
                );
                info!(id, fingerprint, "new pattern stored");
                entry.insert(record.clone());
                Ok(Lookup {
                    record,
                    created: true,
                    similarity: 1.0,
                })
            }
        }
    }

    /// Apply one interaction to a stored record and return its new state
    ///
    /// Weight only grows; `success = false` still counts the occurrence.
    pub fn reinforce(
        &self,
        fingerprint: &str,
        signature: Signature,
        success: bool,
        interaction: u64,
    ) -> Result<InteractionRecord> {
        let mut record = self
            .records
            .get_mut(fingerprint)
            .ok_or_else(|| Error::RecordNotFound(fingerprint.to_string()))?;
        record.reinforce(signature, success, self.weight_increment, interaction);
        Ok(record.clone())
    }

    pub fn get(&self, fingerprint: &str) -> Option<InteractionRecord> {
        self.records.get(fingerprint).map(|r| r.clone())
    }

    /// Snapshot of every record, oldest first
    pub fn records(&self) -> Vec<InteractionRecord> {
        let mut all: Vec<InteractionRecord> = self.records.iter().map(|r| r.clone()).collect();
        all.sort_by_key(|r| r.id);
        all
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn similarity_policy(&self) -> &str {
        self.similarity.name()
    }

    pub fn stats(&self) -> MemoryStats {
        let mut stats = MemoryStats::default();
        let mut weight_sum = 0.0;
        for record in self.records.iter() {
            stats.total_records += 1;
            stats.total_occurrences += record.occurrence_count;
            weight_sum += record.weight;
            stats.max_weight = stats.max_weight.max(record.weight);
        }
        if stats.total_records > 0 {
            stats.avg_weight = weight_sum / stats.total_records as f64;
        }
        stats
    }

    /// Administrative: replace all records, e.g. from a saved snapshot
    pub fn restore(&self, records: Vec<InteractionRecord>) -> Result<()> {
        if let Some(capacity) = self.max_records {
            if records.len() > capacity {
                return Err(Error::StoreCapacityExceeded { capacity });
            }
        }
        self.records.clear();
        let max_id = records.iter().map(|r| r.id).max().unwrap_or(0);
        self.len.store(records.len(), Ordering::Release);
        for record in records {
            self.records.insert(record.fingerprint.clone(), record);
        }
        self.next_id.store(max_id, Ordering::Release);
        info!(records = self.records.len(), "pattern store restored");
        Ok(())
    }

    /// Administrative: drop every record. Not part of the interaction path.
    pub fn clear(&self) {
        self.records.clear();
        self.len.store(0, Ordering::Release);
        info!("pattern store cleared");
    }

    fn best_similar(&self, representative_input: &str) -> Option<(InteractionRecord, f64)> {
        if self.similarity.exact_only() {
            return None;
        }

        let mut best: Option<(InteractionRecord, f64)> = None;
        for record in self.records.iter() {
            let Some(score) = self
                .similarity
                .matches(representative_input, &record.representative_input)
            else {
                continue;
            };
            let better = match &best {
                None => true,
                Some((current, top)) => score > *top || (score == *top && record.id < current.id),
            };
            if better {
                best = Some((record.clone(), score));
            }
        }
        best
    }

    fn reserve_slot(&self) -> Result<()> {
        let Some(capacity) = self.max_records else {
            self.len.fetch_add(1, Ordering::AcqRel);
            return Ok(());
        };
        self.len
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| (n < capacity).then_some(n + 1))
            .map(|_| ())
            .map_err(|_| {
                warn!(capacity, "pattern store full, refusing new pattern");
                Error::StoreCapacityExceeded { capacity }
            })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimilarityKind;
    use crate::core::similarity::JaccardSimilarity;
    use std::sync::Arc;
    use std::thread;

    fn sig() -> Signature {
        Signature::new(1.0, 2.0)
    }

    fn jaccard_config(threshold: f64) -> MemoryConfig {
        MemoryConfig {
            similarity: SimilarityKind::Jaccard,
            similarity_threshold: threshold,
            ..Default::default()
        }
    }

    #[test]
    fn test_create_then_find() {
        let store = PatternStore::default();
        let first = store.lookup_or_create("fp1", "hello world").unwrap();
        assert!(first.created);
        assert_eq!(first.record.occurrence_count, 0);
        assert_eq!(first.record.weight, 1.0);
        assert_eq!(first.record.id, 1);

        let second = store.lookup_or_create("fp1", "hello world").unwrap();
        assert!(!second.created);
        assert_eq!(second.record.id, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_distinct_fingerprints_get_distinct_records() {
        let store = PatternStore::default();
        store.lookup_or_create("a", "alpha").unwrap();
        store.lookup_or_create("b", "beta").unwrap();
        assert_eq!(store.len(), 2);
        let ids: Vec<u64> = store.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_exact_policy_ignores_similar_text() {
        let store = PatternStore::default();
        store.lookup_or_create("a", "the quick brown fox").unwrap();
        let lookup = store.lookup_or_create("b", "the quick brown fox jumps").unwrap();
        assert!(lookup.created);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_jaccard_policy_merges_similar_text() {
        let store = PatternStore::new(&jaccard_config(0.75));
        store.lookup_or_create("a", "the quick brown fox").unwrap();
        let lookup = store.lookup_or_create("b", "the quick brown fox jumps").unwrap();
        assert!(!lookup.created);
        assert_eq!(lookup.record.fingerprint, "a");
        assert!((lookup.similarity - 0.8).abs() < 1e-12);
        assert_eq!(store.len(), 1);

        let unrelated = store.lookup_or_create("c", "entirely different words").unwrap();
        assert!(unrelated.created);
    }

    #[test]
    fn test_jaccard_prefers_best_then_oldest() {
        let store = PatternStore::with_policy(
            &MemoryConfig::default(),
            Box::new(JaccardSimilarity::new(0.5)),
        );
        store.lookup_or_create("a", "x y").unwrap();
        // "x z" vs "x y" = 1/3, below threshold
        assert!(store.lookup_or_create("b", "x z").unwrap().created);

        // 2/3 against both: the older record wins
        let tie = store.lookup_or_create("q1", "x y z").unwrap();
        assert_eq!(tie.record.fingerprint, "a");

        // 2/3 against b, 1/4 against a
        let best = store.lookup_or_create("q2", "x z w").unwrap();
        assert_eq!(best.record.fingerprint, "b");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_reinforce_updates_in_place() {
        let store = PatternStore::default();
        store.lookup_or_create("fp", "text").unwrap();
        let once = store.reinforce("fp", sig(), true, 1).unwrap();
        let twice = store.reinforce("fp", Signature::new(3.0, 1.0), true, 2).unwrap();
        assert_eq!(twice.occurrence_count, 2);
        assert!(twice.weight > once.weight);
        assert_eq!(twice.last_signature, Some(Signature::new(3.0, 1.0)));
        assert_eq!(twice.first_seen_at, Some(1));
        assert_eq!(twice.last_seen_at, Some(2));
        assert_eq!(store.get("fp").unwrap(), twice);
    }

    #[test]
    fn test_failed_reinforce_never_lowers_weight() {
        let store = PatternStore::default();
        store.lookup_or_create("fp", "text").unwrap();
        let mut last = 1.0;
        for (i, success) in [true, false, false, true, false].into_iter().enumerate() {
            let record = store.reinforce("fp", sig(), success, i as u64 + 1).unwrap();
            assert!(record.weight >= last);
            last = record.weight;
        }
        assert!((last - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_reinforce_unknown_fingerprint() {
        let store = PatternStore::default();
        let err = store.reinforce("missing", sig(), true, 1).unwrap_err();
        assert!(matches!(err, Error::RecordNotFound(_)));
    }

    #[test]
    fn test_capacity_is_explicit() {
        let config = MemoryConfig {
            max_records: Some(2),
            ..Default::default()
        };
        let store = PatternStore::new(&config);
        store.lookup_or_create("a", "a").unwrap();
        store.lookup_or_create("b", "b").unwrap();
        let err = store.lookup_or_create("c", "c").unwrap_err();
        assert!(matches!(err, Error::StoreCapacityExceeded { capacity: 2 }));
        // Existing patterns remain reachable
        assert!(!store.lookup_or_create("a", "a").unwrap().created);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_stats() {
        let store = PatternStore::default();
        assert_eq!(store.stats(), MemoryStats::default());
        store.lookup_or_create("a", "a").unwrap();
        store.lookup_or_create("b", "b").unwrap();
        store.reinforce("a", sig(), true, 1).unwrap();
        store.reinforce("a", sig(), true, 2).unwrap();
        store.reinforce("b", sig(), true, 3).unwrap();
        let stats = store.stats();
        assert_eq!(stats.total_records, 2);
        assert_eq!(stats.total_occurrences, 3);
        assert!((stats.max_weight - 1.2).abs() < 1e-12);
        assert!((stats.avg_weight - 1.15).abs() < 1e-12);
    }

    #[test]
    fn test_restore_and_clear() {
        let store = PatternStore::default();
        store.lookup_or_create("a", "a").unwrap();
        let saved = store.records();

        let other = PatternStore::default();
        other.restore(saved.clone()).unwrap();
        assert_eq!(other.records(), saved);
        // ids continue after the restored maximum
        assert_eq!(other.lookup_or_create("b", "b").unwrap().record.id, 2);

        other.clear();
        assert!(other.is_empty());
    }

    #[test]
    fn test_concurrent_same_fingerprint_serializes() {
        let store = Arc::new(PatternStore::default());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..250 {
                        let lookup = store.lookup_or_create("shared", "shared text").unwrap();
                        store
                            .reinforce(&lookup.record.fingerprint, sig(), true, t * 250 + i)
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 1);
        let record = store.get("shared").unwrap();
        assert_eq!(record.occurrence_count, 2000);
        assert!((record.weight - (1.0 + 2000.0 * 0.1)).abs() < 1e-6);
    }
}
