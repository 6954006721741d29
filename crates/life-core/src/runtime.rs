// ─────────────────────────────────────────────────────────────────────
// Toroidal Life — SPMD Runtime
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Fixed-size symmetric runtime: every worker runs identical logic
//! over its own row band, with no shared cell buffers. The runtime
//! wires the ring, spawns one scoped thread per rank, and afterwards
//! reassembles the interior bands into the final global grid — the
//! only point where the full grid is ever materialized.

use std::fmt;
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use ndarray::{s, Array2};

use life_types::config::SimConfig;
use life_types::error::{LifeError, LifeResult};

use crate::engine::SimulationLoop;
use crate::grid::LocalGrid;
use crate::halo::RingLink;
use crate::partition::{partition_table, RowPartition};
use crate::timing::TimingCoordinator;

/// How the interior cells get their initial state.
pub enum GridSeed {
    /// Every worker fills its own band from a per-rank RNG. With
    /// `seed: None` the base seed comes from the wall clock.
    Random { probability: f64, seed: Option<u64> },
    /// A full `rows × cols` grid the runtime scatters across workers.
    Explicit(Array2<u8>),
}

/// Summary produced by the designated root worker.
#[derive(Debug, Clone, PartialEq)]
pub struct SimReport {
    pub workers: usize,
    pub rows: usize,
    pub cols: usize,
    pub steps: usize,
    /// Wall-clock seconds of the slowest worker.
    pub max_elapsed: f64,
}

impl fmt::Display for SimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "workers: {}", self.workers)?;
        writeln!(f, "grid: {} x {}", self.rows, self.cols)?;
        writeln!(f, "steps: {}", self.steps)?;
        write!(f, "max elapsed: {:.6} s", self.max_elapsed)
    }
}

/// Final state plus the root worker's report.
#[derive(Debug)]
pub struct SimOutcome {
    pub grid: Array2<u8>,
    pub report: SimReport,
}

struct WorkerOutput {
    rank: usize,
    interior: Array2<u8>,
    /// `Some` only on the root rank.
    reduced_max: Option<f64>,
}

/// Run one full simulation with the configured worker count.
pub fn run_simulation(config: &SimConfig, seed: &GridSeed) -> LifeResult<SimOutcome> {
    config.validate()?;
    validate_seed(config, seed)?;

    let parts = partition_table(config.rows, config.workers)?;
    let links = RingLink::ring(config.workers)?;
    let timers = TimingCoordinator::for_ring(config.workers);
    let base_seed = base_seed(seed);

    let mut outputs: Vec<LifeResult<WorkerOutput>> = Vec::with_capacity(config.workers);
    thread::scope(|scope| {
        let handles: Vec<_> = parts
            .iter()
            .zip(links.into_iter().zip(timers))
            .map(|(part, (mut link, timer))| {
                let steps = config.steps;
                let cols = config.cols;
                scope.spawn(move || -> LifeResult<WorkerOutput> {
                    let mut grid = LocalGrid::new(part.local_rows, cols)?;
                    seed_band(&mut grid, part, seed, base_seed)?;

                    let started = timer.start();
                    let mut sim = SimulationLoop::new(steps);
                    sim.run(&mut grid, &mut link)?;
                    let reduced_max = timer.finish(started)?;

                    Ok(WorkerOutput {
                        rank: part.rank,
                        interior: grid.interior().to_owned(),
                        reduced_max,
                    })
                })
            })
            .collect();

        for handle in handles {
            outputs.push(handle.join().unwrap_or_else(|_| {
                Err(LifeError::Communication(
                    "worker panicked mid-run".to_string(),
                ))
            }));
        }
    });

    let mut gathered = Array2::zeros((config.rows, config.cols));
    let mut max_elapsed = None;
    for output in outputs {
        let output = output?;
        let part = &parts[output.rank];
        gathered
            .slice_mut(s![part.row_offset..part.row_end(), ..])
            .assign(&output.interior);
        if output.reduced_max.is_some() {
            max_elapsed = output.reduced_max;
        }
    }
    let max_elapsed = max_elapsed.ok_or_else(|| {
        LifeError::Communication("root worker produced no timing reduction".to_string())
    })?;

    Ok(SimOutcome {
        grid: gathered,
        report: SimReport {
            workers: config.workers,
            rows: config.rows,
            cols: config.cols,
            steps: config.steps,
            max_elapsed,
        },
    })
}

/// Convenience entry point: random seeding straight from the config.
pub fn run_from_config(config: &SimConfig) -> LifeResult<SimOutcome> {
    run_simulation(
        config,
        &GridSeed::Random {
            probability: config.fill_probability,
            seed: config.seed,
        },
    )
}

/// Reject bad seed inputs before any thread is spawned. A worker that
/// failed while seeding would never reach the start barrier, leaving
/// the other ranks waiting there forever, so every input that can make
/// seeding fail is checked here on the spawning thread instead.
fn validate_seed(config: &SimConfig, seed: &GridSeed) -> LifeResult<()> {
    match seed {
        GridSeed::Random { probability, .. } => {
            if !(0.0..=1.0).contains(probability) {
                return Err(LifeError::Config(format!(
                    "fill probability must be in [0, 1], got {probability}"
                )));
            }
        }
        GridSeed::Explicit(grid) => {
            if grid.dim() != (config.rows, config.cols) {
                return Err(LifeError::Config(format!(
                    "explicit grid shape {:?} does not match configured {}x{}",
                    grid.dim(),
                    config.rows,
                    config.cols
                )));
            }
            if grid.iter().any(|&c| c > 1) {
                return Err(LifeError::Config(
                    "explicit grid cells must be 0 or 1".to_string(),
                ));
            }
        }
    }
    Ok(())
}

fn seed_band(
    grid: &mut LocalGrid,
    part: &RowPartition,
    seed: &GridSeed,
    base_seed: u64,
) -> LifeResult<()> {
    match seed {
        GridSeed::Random { probability, .. } => {
            grid.seed_random(*probability, worker_seed(base_seed, part.rank))
        }
        GridSeed::Explicit(global) => {
            grid.load_interior(global.slice(s![part.row_offset..part.row_end(), ..]))
        }
    }
}

fn base_seed(seed: &GridSeed) -> u64 {
    match seed {
        GridSeed::Random { seed: Some(s), .. } => *s,
        // Reference behavior: seed from the wall clock when the caller
        // does not pin one. Tests always pin.
        GridSeed::Random { seed: None, .. } => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0),
        GridSeed::Explicit(_) => 0,
    }
}

/// Per-rank seed derivation; ranks never share a stream.
fn worker_seed(base: u64, rank: usize) -> u64 {
    base ^ (rank as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn small_config(rows: usize, cols: usize, steps: usize, workers: usize) -> SimConfig {
        SimConfig {
            rows,
            cols,
            steps,
            workers,
            fill_probability: 0.5,
            seed: Some(42),
        }
    }

    #[test]
    fn test_zero_steps_round_trips_an_explicit_grid() {
        let grid = array![
            [1u8, 0, 1, 0],
            [0, 1, 0, 1],
            [1, 1, 0, 0],
            [0, 0, 1, 1],
            [1, 0, 0, 1],
        ];
        let cfg = small_config(5, 4, 0, 2);
        let outcome = run_simulation(&cfg, &GridSeed::Explicit(grid.clone())).unwrap();
        assert_eq!(outcome.grid, grid);
    }

    #[test]
    fn test_gather_preserves_band_order() {
        // Ascending-stripe grid: each band must land back at its own
        // offset after a zero-step run with uneven bands (7 = 3+2+2).
        let stripes = Array2::from_shape_fn((7, 3), |(i, _)| u8::from(i % 2 == 0));
        let cfg = small_config(7, 3, 0, 3);
        let outcome = run_simulation(&cfg, &GridSeed::Explicit(stripes.clone())).unwrap();
        assert_eq!(outcome.grid, stripes);
    }

    #[test]
    fn test_report_carries_run_parameters() {
        let cfg = small_config(8, 8, 2, 2);
        let outcome = run_from_config(&cfg).unwrap();
        let report = outcome.report;
        assert_eq!(report.workers, 2);
        assert_eq!(report.rows, 8);
        assert_eq!(report.cols, 8);
        assert_eq!(report.steps, 2);
        assert!(report.max_elapsed >= 0.0);
        let text = report.to_string();
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("workers: 2"));
        assert!(text.contains("grid: 8 x 8"));
    }

    #[test]
    fn test_random_seeding_differs_across_workers() {
        // All-defaults probability 0.5 and a pinned seed: the two
        // bands must not come out identical.
        let cfg = small_config(8, 32, 0, 2);
        let outcome = run_from_config(&cfg).unwrap();
        let top = outcome.grid.slice(s![0..4, ..]).to_owned();
        let bottom = outcome.grid.slice(s![4..8, ..]).to_owned();
        assert_ne!(top, bottom);
    }

    #[test]
    fn test_random_runs_reproduce_with_pinned_seed() {
        let cfg = small_config(12, 10, 5, 3);
        let a = run_from_config(&cfg).unwrap();
        let b = run_from_config(&cfg).unwrap();
        assert_eq!(a.grid, b.grid);
    }

    #[test]
    fn test_explicit_grid_shape_mismatch_is_config_error() {
        let cfg = small_config(5, 4, 1, 2);
        let wrong = Array2::<u8>::zeros((4, 4));
        match run_simulation(&cfg, &GridSeed::Explicit(wrong)).unwrap_err() {
            LifeError::Config(msg) => assert!(msg.contains("does not match")),
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_nonbinary_explicit_grid_fails_before_spawning_workers() {
        // A single bad cell must surface as a Config error from the
        // spawning thread. If the check ran inside a worker instead,
        // the failing rank would exit before the start barrier and the
        // healthy rank would wait there forever.
        let cfg = small_config(6, 4, 1, 2);
        let mut grid = Array2::<u8>::zeros((6, 4));
        grid[[4, 1]] = 2;
        match run_simulation(&cfg, &GridSeed::Explicit(grid)).unwrap_err() {
            LifeError::Config(msg) => assert!(msg.contains("0 or 1")),
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_seed_probability_fails_before_spawning_workers() {
        // The config's own fill probability is valid here; only the
        // injected seed's is not, and it must still be caught up front.
        let cfg = small_config(6, 4, 1, 2);
        let seed = GridSeed::Random {
            probability: 2.0,
            seed: Some(1),
        };
        match run_simulation(&cfg, &seed).unwrap_err() {
            LifeError::Config(msg) => assert!(msg.contains("probability")),
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_oversubscribed_worker_count_fails_before_any_work() {
        let cfg = small_config(3, 4, 1, 8);
        assert!(matches!(
            run_from_config(&cfg).unwrap_err(),
            LifeError::Config(_)
        ));
    }
}
