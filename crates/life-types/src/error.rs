// ─────────────────────────────────────────────────────────────────────
// Toroidal Life — Error Taxonomy
// License: MIT
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LifeError {
    /// Invalid run parameters, rejected before any simulation work begins.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A neighbor exchange or reduction failed to complete. Fatal for the
    /// whole run: grid state is only meaningful as a consistent snapshot.
    #[error("Communication error: {0}")]
    Communication(String),

    /// Cell buffer sizing failed for the requested dimensions.
    #[error("Allocation failed for {rows}x{cols} cell buffer")]
    Allocation { rows: usize, cols: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type LifeResult<T> = Result<T, LifeError>;
