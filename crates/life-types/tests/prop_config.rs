// ─────────────────────────────────────────────────────────────────────
// Toroidal Life — Property-Based Tests (proptest) for life-types
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for life-types using proptest.
//!
//! Covers: SimConfig validation bounds and serialization roundtrip.

use life_types::config::SimConfig;
use proptest::prelude::*;

proptest! {
    /// Any worker count in [1, rows] with a sane fill probability is
    /// accepted.
    #[test]
    fn config_accepts_feasible_partitions(
        rows in 1usize..2048,
        cols in 1usize..2048,
        steps in 0usize..500,
        frac in 0.0f64..=1.0,
    ) {
        let workers = 1 + (rows - 1) / 2;
        let cfg = SimConfig {
            rows,
            cols,
            steps,
            workers,
            fill_probability: frac,
            seed: Some(7),
        };
        prop_assert!(cfg.validate().is_ok());
    }

    /// A worker count exceeding the row count is always rejected.
    #[test]
    fn config_rejects_oversubscribed_partitions(
        rows in 1usize..512,
        excess in 1usize..64,
    ) {
        let mut cfg = SimConfig::with_workers(rows + excess);
        cfg.rows = rows;
        prop_assert!(cfg.validate().is_err());
    }

    /// JSON roundtrip preserves every field.
    #[test]
    fn config_serialization_roundtrip(
        rows in 1usize..4096,
        cols in 1usize..4096,
        steps in 0usize..1000,
        workers in 1usize..64,
        seed in proptest::option::of(any::<u64>()),
    ) {
        let cfg = SimConfig {
            rows,
            cols,
            steps,
            workers,
            fill_probability: 0.5,
            seed,
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SimConfig = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back.rows, rows);
        prop_assert_eq!(back.cols, cols);
        prop_assert_eq!(back.steps, steps);
        prop_assert_eq!(back.workers, workers);
        prop_assert_eq!(back.seed, seed);
    }
}
