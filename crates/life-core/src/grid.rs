// ─────────────────────────────────────────────────────────────────────
// Toroidal Life — Local Grid
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! A worker's slice of the grid: `local_rows + 2` rows of cells in two
//! row-major buffers, with ghost rows at the top and bottom.
//!
//! Row 0 and row `local_rows + 1` hold copies of the neighbors'
//! boundary rows. They are refreshed before every stencil update and
//! are never authoritative here. Rows `1..=local_rows` are owned.

use ndarray::{s, Array2, ArrayView1, ArrayView2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use life_types::error::{LifeError, LifeResult};

/// Double-buffered local cell state. Cells are `0` (dead) or `1` (live).
#[derive(Debug, Clone)]
pub struct LocalGrid {
    current: Array2<u8>,
    next: Array2<u8>,
    local_rows: usize,
    cols: usize,
}

impl LocalGrid {
    /// Allocate two zeroed `(local_rows + 2) × cols` buffers.
    pub fn new(local_rows: usize, cols: usize) -> LifeResult<Self> {
        if local_rows == 0 || cols == 0 {
            return Err(LifeError::Allocation {
                rows: local_rows,
                cols,
            });
        }
        let padded = local_rows
            .checked_add(2)
            .filter(|padded| padded.checked_mul(cols).is_some())
            .ok_or(LifeError::Allocation {
                rows: local_rows,
                cols,
            })?;
        Ok(LocalGrid {
            current: Array2::zeros((padded, cols)),
            next: Array2::zeros((padded, cols)),
            local_rows,
            cols,
        })
    }

    pub fn local_rows(&self) -> usize {
        self.local_rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Index of the bottom ghost row, `local_rows + 1`.
    pub fn ghost_bottom_index(&self) -> usize {
        self.local_rows + 1
    }

    /// Fill the interior rows from a seeded RNG; ghost rows stay zero.
    ///
    /// The seed must already be worker-distinct (the runtime derives it
    /// from the base seed and the rank) so no two workers generate
    /// identical rows.
    pub fn seed_random(&mut self, probability: f64, seed: u64) -> LifeResult<()> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(LifeError::Config(format!(
                "fill probability must be in [0, 1], got {probability}"
            )));
        }
        let mut rng = StdRng::seed_from_u64(seed);
        for i in 1..=self.local_rows {
            for j in 0..self.cols {
                self.current[[i, j]] = u8::from(rng.gen_bool(probability));
            }
        }
        Ok(())
    }

    /// Install explicit interior rows (one global band), e.g. when the
    /// runtime scatters a caller-supplied grid.
    pub fn load_interior(&mut self, band: ArrayView2<u8>) -> LifeResult<()> {
        if band.dim() != (self.local_rows, self.cols) {
            return Err(LifeError::Config(format!(
                "band shape mismatch: expected ({}, {}), got {:?}",
                self.local_rows,
                self.cols,
                band.dim()
            )));
        }
        if band.iter().any(|&c| c > 1) {
            return Err(LifeError::Config(
                "cells must be 0 or 1".to_string(),
            ));
        }
        self.current
            .slice_mut(s![1..=self.local_rows, ..])
            .assign(&band);
        Ok(())
    }

    /// Read one cell of the current buffer by local row index
    /// (0 = top ghost row).
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.current[[row, col]]
    }

    /// Write one cell of the current buffer.
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        self.current[[row, col]] = value;
    }

    /// View of the owned rows `1..=local_rows` of the current buffer.
    pub fn interior(&self) -> ArrayView2<u8> {
        self.current.slice(s![1..=self.local_rows, ..])
    }

    /// One row of the current buffer (ghost rows included).
    pub fn row(&self, row: usize) -> ArrayView1<u8> {
        self.current.row(row)
    }

    /// Copy of the first owned row, for sending up the ring.
    pub fn first_interior_row(&self) -> Vec<u8> {
        self.current.row(1).to_vec()
    }

    /// Copy of the last owned row, for sending down the ring.
    pub fn last_interior_row(&self) -> Vec<u8> {
        self.current.row(self.local_rows).to_vec()
    }

    /// Install the up-neighbor's last authoritative row as ghost row 0.
    pub fn set_ghost_top(&mut self, row: &[u8]) -> LifeResult<()> {
        self.set_ghost(0, row)
    }

    /// Install the down-neighbor's first authoritative row as the
    /// bottom ghost row.
    pub fn set_ghost_bottom(&mut self, row: &[u8]) -> LifeResult<()> {
        self.set_ghost(self.local_rows + 1, row)
    }

    fn set_ghost(&mut self, index: usize, row: &[u8]) -> LifeResult<()> {
        if row.len() != self.cols {
            return Err(LifeError::Communication(format!(
                "halo row length mismatch: expected {}, got {}",
                self.cols,
                row.len()
            )));
        }
        self.current
            .row_mut(index)
            .assign(&ArrayView1::from(row));
        Ok(())
    }

    /// Single-worker toroidal wrap: both neighbors are this worker, so
    /// the ghost rows come from its own boundary rows.
    pub fn self_wrap(&mut self) {
        let first = self.first_interior_row();
        let last = self.last_interior_row();
        self.current.row_mut(0).assign(&ArrayView1::from(&last[..]));
        self.current
            .row_mut(self.local_rows + 1)
            .assign(&ArrayView1::from(&first[..]));
    }

    /// Exchange which buffer is "current" in O(1); no cells are copied.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    /// The read-only current buffer and the writable next buffer, for
    /// the stencil pass.
    pub(crate) fn buffers_mut(&mut self) -> (&Array2<u8>, &mut Array2<u8>) {
        (&self.current, &mut self.next)
    }
}
