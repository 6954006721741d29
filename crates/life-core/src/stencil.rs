// ─────────────────────────────────────────────────────────────────────
// Toroidal Life — Stencil Update
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Next-generation computation over a worker's interior rows.
//!
//! The vertical neighborhood comes straight from the ghost-extended
//! buffer; global vertical wraparound is already resolved by the halo
//! exchange. Columns wrap locally with modular arithmetic, so the grid
//! is toroidal in both directions.

use crate::grid::LocalGrid;

/// B3/S23: a live cell survives on 2 or 3 live neighbors, a dead cell
/// is born on exactly 3, everything else keeps its state.
pub fn apply_rule(alive: u8, neighbors: u32) -> u8 {
    if alive == 1 {
        u8::from((2..=3).contains(&neighbors))
    } else {
        u8::from(neighbors == 3)
    }
}

/// Write the next generation of every interior cell into the `next`
/// buffer. The `current` buffer is read-only for the whole pass, so
/// the update is a pure function of the pre-step state. Ghost rows of
/// `next` are left alone; the exchanger refreshes them next step.
pub fn step(grid: &mut LocalGrid) {
    let rows = grid.local_rows();
    let cols = grid.cols();
    let (current, next) = grid.buffers_mut();

    for i in 1..=rows {
        for j in 0..cols {
            let left = (j + cols - 1) % cols;
            let right = (j + 1) % cols;
            let neighbors = u32::from(current[[i - 1, left]])
                + u32::from(current[[i - 1, j]])
                + u32::from(current[[i - 1, right]])
                + u32::from(current[[i, left]])
                + u32::from(current[[i, right]])
                + u32::from(current[[i + 1, left]])
                + u32::from(current[[i + 1, j]])
                + u32::from(current[[i + 1, right]]);
            next[[i, j]] = apply_rule(current[[i, j]], neighbors);
        }
    }
}
