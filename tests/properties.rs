use proptest::prelude::*;
use spectral_stats::{Snapshot, StatsEngine};

/// Statistics of the live window recomputed from scratch
struct Reference {
    min: f64,
    max: f64,
    median: f64,
    mean: f64,
}

fn reference(window: &[f64]) -> Reference {
    let mut sorted = window.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    Reference {
        min: sorted[0],
        max: sorted[n - 1],
        median,
        mean: window.iter().sum::<f64>() / n as f64,
    }
}

fn samples() -> impl Strategy<Value = Vec<f64>> {
    // Small integer grid so duplicates are frequent
    prop::collection::vec((-20i32..20).prop_map(|v| v as f64 / 2.0), 1..120)
}

proptest! {
    #[test]
    fn matches_brute_force(window_size in 1usize..16, input in samples()) {
        let mut engine = StatsEngine::new(window_size).unwrap();

        for (i, &v) in input.iter().enumerate() {
            let stats = engine.update(v).unwrap();
            let start = (i + 1).saturating_sub(window_size);
            let live = &input[start..=i];
            let expected = reference(live);

            prop_assert_eq!(stats.current, v);
            prop_assert_eq!(stats.min, expected.min);
            prop_assert_eq!(stats.max, expected.max);
            prop_assert_eq!(stats.median, expected.median);
            prop_assert!((stats.mean - expected.mean).abs() < 1e-9);
            prop_assert!(stats.min <= stats.median && stats.median <= stats.max);
            prop_assert!((0.0..=1.0).contains(&stats.normalized));
            prop_assert!(stats.standard_deviation >= 0.0);

            let window: Vec<f64> = engine.window().copied().collect();
            prop_assert_eq!(window.as_slice(), live);
        }
    }

    #[test]
    fn extremes_normalize_to_bounds(input in samples()) {
        let mut engine = StatsEngine::new(8).unwrap();
        for v in input {
            let stats = engine.update(v).unwrap();
            if stats.min != stats.max {
                if v == stats.min {
                    prop_assert_eq!(stats.normalized, 0.0);
                }
                if v == stats.max {
                    prop_assert_eq!(stats.normalized, 1.0);
                }
            } else {
                prop_assert_eq!(stats.normalized, 0.5);
                prop_assert_eq!(stats.z_score, 1.0);
            }
        }
    }

    #[test]
    fn rejected_samples_change_nothing(
        input in samples(),
        bad_at in 0usize..120,
        bad in prop_oneof![Just(f64::NAN), Just(f64::INFINITY), Just(f64::NEG_INFINITY)],
    ) {
        let mut clean = StatsEngine::new(5).unwrap();
        let mut dirty = StatsEngine::new(5).unwrap();

        for (i, &v) in input.iter().enumerate() {
            if i == bad_at {
                prop_assert!(dirty.update(bad).is_err());
            }
            let expected: Snapshot = clean.update(v).unwrap();
            prop_assert_eq!(dirty.update(v).unwrap(), expected);
        }
    }
}

#[test]
fn history_size_changes_the_picture() {
    let mut small = StatsEngine::new(10).unwrap();
    let mut large = StatsEngine::new(500).unwrap();
    let lows = (0..15).map(|i| 0.1 + i as f64 * 0.001);
    let highs = (0..15).map(|i| 0.9 + i as f64 * 0.001);

    let mut last = (Snapshot::default(), Snapshot::default());
    for v in lows.chain(highs) {
        last = (small.update(v).unwrap(), large.update(v).unwrap());
    }

    let (s, l) = last;
    assert!((s.min - 0.905).abs() < 1e-12);
    assert!((l.min - 0.1).abs() < 1e-12);
    assert_ne!(s.min, l.min);
}
