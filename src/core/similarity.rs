//! Similarity policies for pattern matching
//!
//! The pattern store always tries fingerprint equality first. A policy
//! decides whether a miss may still match an existing record.

use std::collections::HashSet;
use std::fmt::Debug;

use crate::config::{MemoryConfig, SimilarityKind};

/// Pluggable matching rule between two representative inputs
pub trait SimilarityPolicy: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// `Some(score)` when `candidate` counts as the same pattern as `stored`
    fn matches(&self, candidate: &str, stored: &str) -> Option<f64>;

    /// When true the store skips the similarity scan entirely
    fn exact_only(&self) -> bool {
        false
    }
}

/// Fingerprint equality only
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactMatch;

impl SimilarityPolicy for ExactMatch {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn matches(&self, candidate: &str, stored: &str) -> Option<f64> {
        (candidate == stored).then_some(1.0)
    }

    fn exact_only(&self) -> bool {
        true
    }
}

/// Word-set Jaccard overlap strictly above a threshold
#[derive(Debug, Clone, Copy)]
pub struct JaccardSimilarity {
    threshold: f64,
}

impl JaccardSimilarity {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl SimilarityPolicy for JaccardSimilarity {
    fn name(&self) -> &'static str {
        "jaccard"
    }

    fn matches(&self, candidate: &str, stored: &str) -> Option<f64> {
        let score = jaccard(candidate, stored);
        (score > self.threshold).then_some(score)
    }
}

/// |A ∩ B| / |A ∪ B| over whitespace-separated words; 0 when both empty
pub fn jaccard(a: &str, b: &str) -> f64 {
    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();

    let union = words_a.union(&words_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = words_a.intersection(&words_b).count();
    intersection as f64 / union as f64
}

/// Build the policy named in the memory config
pub fn from_config(config: &MemoryConfig) -> Box<dyn SimilarityPolicy> {
    match config.similarity {
        SimilarityKind::Exact => Box::new(ExactMatch),
        SimilarityKind::Jaccard => Box::new(JaccardSimilarity::new(config.similarity_threshold)),
    }
}
