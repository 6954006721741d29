// ─────────────────────────────────────────────────────────────────────
// Toroidal Life — Config
// License: MIT
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::error::{LifeError, LifeResult};

/// Startup configuration for one simulation run.
///
/// `workers` is the only required field; the grid and step defaults
/// match the reference benchmark dimensions (1000×1000, 200 steps).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Total number of global grid rows.
    #[serde(default = "default_rows")]
    pub rows: usize,
    /// Number of columns in every row.
    #[serde(default = "default_cols")]
    pub cols: usize,
    /// Number of generations to iterate.
    #[serde(default = "default_steps")]
    pub steps: usize,
    /// Number of SPMD workers the rows are partitioned across.
    pub workers: usize,
    /// Per-cell probability of being seeded alive.
    #[serde(default = "default_fill_probability")]
    pub fill_probability: f64,
    /// Base RNG seed. When absent, the runtime derives one from the
    /// wall clock; tests should always pin it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_rows() -> usize {
    1000
}
fn default_cols() -> usize {
    1000
}
fn default_steps() -> usize {
    200
}
fn default_fill_probability() -> f64 {
    0.5
}

impl SimConfig {
    /// Configuration for `workers` workers with all other fields at
    /// their defaults.
    pub fn with_workers(workers: usize) -> Self {
        SimConfig {
            rows: default_rows(),
            cols: default_cols(),
            steps: default_steps(),
            workers,
            fill_probability: default_fill_probability(),
            seed: None,
        }
    }

    /// Load from a JSON file.
    pub fn from_file(path: &str) -> LifeResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Reject parameters the engine cannot run with.
    ///
    /// A worker count exceeding the row count is fatal here rather than
    /// silently producing zero-row workers.
    pub fn validate(&self) -> LifeResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(LifeError::Config(format!(
                "grid dimensions must be positive, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.workers == 0 {
            return Err(LifeError::Config("worker count must be >= 1".to_string()));
        }
        if self.workers > self.rows {
            return Err(LifeError::Config(format!(
                "cannot partition {} rows across {} workers: a worker would own zero rows",
                self.rows, self.workers
            )));
        }
        if !(0.0..=1.0).contains(&self.fill_probability) {
            return Err(LifeError::Config(format!(
                "fill probability must be in [0, 1], got {}",
                self.fill_probability
            )));
        }
        Ok(())
    }
}
