//! Integration tests for the interaction pipeline
//!
//! - Ten distinct inputs reach DEVELOPING with ten records
//! - Repeated input reinforces one record
//! - Rejected input mutates nothing
//! - Exact and Jaccard matching side by side
//! - Concurrent interactions lose no counts

use eduai::config::{MemoryConfig, SimilarityKind};
use eduai::core::{ExactMatch, JaccardSimilarity, Mind};
use eduai::types::{Band, Stage, Stimulus};
use eduai::{Error, MindConfig};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

fn jaccard_config(threshold: f64) -> MindConfig {
    MindConfig {
        memory: MemoryConfig {
            similarity: SimilarityKind::Jaccard,
            similarity_threshold: threshold,
            ..MemoryConfig::default()
        },
        ..MindConfig::default()
    }
}

// =============================================================================
// LIFECYCLE
// =============================================================================

#[test]
fn test_ten_distinct_inputs_reach_developing() {
    let mind = Mind::new();
    let mut stages = Vec::new();

    for i in 0..10 {
        let outcome = mind.interact(format!("distinct input number {}", i)).unwrap();
        assert!(outcome.new_pattern);
        stages.push(outcome.stage);
    }

    let state = mind.state();
    assert_eq!(state.interaction_count, 10);
    assert_eq!(state.stage, Stage::Developing);
    assert!((state.level - 1.0).abs() < 1e-12);
    assert_eq!(mind.memory().len(), 10);
    assert_eq!(stages[8], Stage::Nascent);
    assert_eq!(stages[9], Stage::Developing);
}

#[test]
fn test_repeated_input_reinforces_one_record() {
    let mind = Mind::new();
    let first = mind.interact("Hello EDU-AI").unwrap();
    let second = mind.interact("Hello EDU-AI").unwrap();

    assert_eq!(mind.memory().len(), 1);
    assert_eq!(second.record.id, first.record.id);
    assert_eq!(second.record.occurrence_count, 2);
    assert!(second.record.weight >= first.record.weight);
    assert!(first.new_pattern);
    assert!(!second.new_pattern);
    assert_eq!(second.record.first_seen_at, Some(1));
    assert_eq!(second.record.last_seen_at, Some(2));
}

#[test]
fn test_whitespace_and_case_share_a_pattern() {
    let mind = Mind::new();
    mind.interact("Hello   World").unwrap();
    let outcome = mind.interact("  hello world ").unwrap();

    assert_eq!(outcome.record.occurrence_count, 2);
    assert_eq!(mind.memory().len(), 1);
}

#[test]
fn test_count_matches_calls_over_stage_thresholds() {
    let mind = Mind::new();
    for i in 0..100u64 {
        let outcome = mind.interact(format!("round {}", i % 7)).unwrap();
        assert_eq!(outcome.interaction_count, i + 1);
        assert_eq!(outcome.stage, Stage::from_count(i + 1));
    }
    assert_eq!(mind.state().stage, Stage::Mature);
    assert_eq!(mind.memory().len(), 7);
    assert_eq!(mind.memory_stats().total_occurrences, 100);
}

#[test]
fn test_band_of_outcome_follows_combined() {
    let mind = Mind::new();
    // One word, 255 chars: modulation π, scaling 406.4
    let long_word = "a".repeat(300);
    let outcome = mind.interact(long_word).unwrap();
    assert_eq!(outcome.band, Band::HighEnergy);
    assert!(outcome.response.contains(&format!("{:.2}", outcome.signature.combined())));
}

// =============================================================================
// REJECTED INPUT
// =============================================================================

#[test]
fn test_invalid_frequency_touches_nothing() {
    let mind = Mind::new();
    mind.interact("warm up").unwrap();

    let err = mind.compute(128.0, 0.0).unwrap_err();
    assert!(matches!(err, Error::InvalidFrequency { .. }));
    assert!(err.is_input_error());

    assert_eq!(mind.state().interaction_count, 1);
    assert_eq!(mind.memory().len(), 1);
}

#[test]
fn test_zero_frequency_through_interact_touches_nothing() {
    let mind = Mind::new();
    mind.interact("warm up").unwrap();
    let before = mind.memory().records();

    // One crossing at the smallest positive rate underflows the frequency to 0
    let err = mind
        .interact(Stimulus::signal(vec![1.0, -1.0], 5e-324))
        .unwrap_err();
    match err {
        Error::InvalidFrequency { frequency } => assert_eq!(frequency, 0.0),
        other => panic!("expected InvalidFrequency, got {:?}", other),
    }

    assert_eq!(mind.state().interaction_count, 1);
    assert_eq!(mind.memory().len(), 1);
    assert_eq!(mind.memory().records(), before);
}

#[test]
fn test_capacity_refusal_touches_nothing() {
    let config = MindConfig {
        memory: MemoryConfig {
            max_records: Some(2),
            ..MemoryConfig::default()
        },
        ..MindConfig::default()
    };
    let mind = Mind::with_config(config).unwrap();
    mind.interact("pattern one").unwrap();
    mind.interact("pattern two").unwrap();

    let err = mind.interact("pattern three").unwrap_err();
    assert!(matches!(err, Error::StoreCapacityExceeded { capacity: 2 }));
    assert!(!err.is_input_error());
    assert_eq!(mind.state().interaction_count, 2);
    assert_eq!(mind.memory().len(), 2);

    let repeat = mind.interact("pattern one").unwrap();
    assert_eq!(repeat.interaction_count, 3);
    assert_eq!(repeat.record.occurrence_count, 2);
}

#[test]
fn test_malformed_stimuli_touch_nothing() {
    let mind = Mind::new();
    mind.interact("warm up").unwrap();
    let before = mind.memory().records();

    let rejected = vec![
        Stimulus::text(""),
        Stimulus::text(" \t\n "),
        Stimulus::signal(vec![], 1000.0),
        Stimulus::signal(vec![0.5, 0.5, 0.5], 1000.0),
        Stimulus::signal(vec![1.0, -1.0], 0.0),
        Stimulus::signal(vec![1.0, f64::NAN, -1.0], 1000.0),
    ];
    for stimulus in rejected {
        let err = mind.interact(stimulus).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)), "got {:?}", err);
    }

    assert_eq!(mind.state().interaction_count, 1);
    assert_eq!(mind.memory().records(), before);
}

#[test]
fn test_signal_stimulus_runs_pipeline() {
    let mind = Mind::new();
    // 10 Hz square wave at 1 kHz, one second
    let samples: Vec<f64> = (0..1001)
        .map(|i| if (i / 50) % 2 == 0 { 0.5 } else { -0.5 })
        .collect();

    let outcome = mind.interact(Stimulus::signal(samples.clone(), 1000.0)).unwrap();
    assert!(outcome.features.frequency > 9.0 && outcome.features.frequency < 11.0);
    assert!((outcome.features.amplitude - 127.5).abs() < 1e-9);

    let again = mind.interact(Stimulus::signal(samples, 1000.0)).unwrap();
    assert_eq!(again.record.occurrence_count, 2);
}

// =============================================================================
// SIMILARITY POLICIES
// =============================================================================

#[test]
fn test_exact_policy_keeps_near_duplicates_apart() {
    let mind = Mind::new();
    mind.interact("the quick brown fox").unwrap();
    let outcome = mind.interact("the quick brown dog").unwrap();

    assert!(outcome.new_pattern);
    assert_eq!(mind.memory().len(), 2);
    assert_eq!(mind.memory().similarity_policy(), "exact");
}

#[test]
fn test_jaccard_policy_merges_near_duplicates() {
    // 3 shared of 5 distinct words = 0.6
    let mind = Mind::with_config(jaccard_config(0.55)).unwrap();
    let first = mind.interact("the quick brown fox").unwrap();
    let second = mind.interact("the quick brown dog").unwrap();

    assert!(!second.new_pattern);
    assert_eq!(second.record.id, first.record.id);
    assert_eq!(second.record.occurrence_count, 2);
    assert_eq!(mind.memory().len(), 1);
}

#[test]
fn test_jaccard_at_threshold_creates() {
    // overlap must exceed the threshold; 0.6 against 0.6 does not
    let mind = Mind::with_config(jaccard_config(0.6)).unwrap();
    mind.interact("the quick brown fox").unwrap();
    let outcome = mind.interact("the quick brown dog").unwrap();

    assert!(outcome.new_pattern);
    assert_eq!(mind.memory().len(), 2);
}

#[test]
fn test_policies_swappable_on_same_scenarios() {
    let exact = Mind::with_similarity(MindConfig::default(), Box::new(ExactMatch)).unwrap();
    let fuzzy = Mind::with_similarity(MindConfig::default(), Box::new(JaccardSimilarity::new(0.5))).unwrap();

    for mind in [&exact, &fuzzy] {
        for i in 0..10 {
            mind.interact(format!("alpha{} beta{} gamma{}", i, i, i)).unwrap();
        }
        mind.interact("repeat me").unwrap();
        let outcome = mind.interact("repeat me").unwrap();

        assert_eq!(mind.state().interaction_count, 12);
        assert_eq!(mind.memory().len(), 11);
        assert_eq!(outcome.record.occurrence_count, 2);
    }
}

// =============================================================================
// CONCURRENCY
// =============================================================================

#[test]
fn test_concurrent_interactions_lose_nothing() {
    let mind = Arc::new(Mind::new());
    let threads = 8;
    let per_thread = 200;

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let mind = Arc::clone(&mind);
            thread::spawn(move || {
                (0..per_thread)
                    .map(|i| {
                        let text = if i % 2 == 0 {
                            "shared pattern".to_string()
                        } else {
                            format!("thread {} item {}", t, i)
                        };
                        mind.interact(text).unwrap().interaction_count
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ordinals = HashSet::new();
    for handle in handles {
        for n in handle.join().unwrap() {
            assert!(ordinals.insert(n), "ordinal {} issued twice", n);
        }
    }

    let total = (threads * per_thread) as u64;
    assert_eq!(ordinals.len() as u64, total);
    assert_eq!(mind.state().interaction_count, total);
    assert_eq!(mind.state().stage, Stage::Transcendent);

    let stats = mind.memory_stats();
    assert_eq!(stats.total_occurrences, total);
    assert_eq!(stats.total_records, 1 + threads * per_thread / 2);

    let shared = mind
        .memory()
        .records()
        .into_iter()
        .find(|r| r.representative_input == "shared pattern")
        .unwrap();
    assert_eq!(shared.occurrence_count, total / 2);
}

#[test]
fn test_isolated_minds_do_not_share_state() {
    let a = Mind::new();
    let b = Mind::new();
    a.interact("only in a").unwrap();

    assert_eq!(a.state().interaction_count, 1);
    assert_eq!(b.state().interaction_count, 0);
    assert!(b.memory().is_empty());
}
