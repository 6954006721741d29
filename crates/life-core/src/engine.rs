// ─────────────────────────────────────────────────────────────────────
// Toroidal Life — Simulation Loop
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Per-worker step iteration: exchange, stencil, buffer swap.

use life_types::error::LifeResult;

use crate::grid::LocalGrid;
use crate::halo::RingLink;
use crate::stencil;

/// Loop lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Done,
}

/// Drives a fixed number of generations over one worker's grid.
///
/// Each iteration refreshes the ghost rows, computes the next
/// generation, then swaps the buffers; the paired exchange keeps ring
/// neighbors in lockstep, so a step never observes stale or future
/// boundary data. No randomness enters after initialization: the loop
/// is deterministic given the seeded grid and the partition.
#[derive(Debug)]
pub struct SimulationLoop {
    steps: usize,
    state: LoopState,
}

impl SimulationLoop {
    pub fn new(steps: usize) -> Self {
        SimulationLoop {
            steps,
            state: LoopState::Idle,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Run all configured steps. With `steps == 0` the grid is left
    /// exactly as seeded.
    pub fn run(&mut self, grid: &mut LocalGrid, link: &mut RingLink) -> LifeResult<()> {
        self.state = LoopState::Running;
        for _ in 0..self.steps {
            link.exchange(grid)?;
            stencil::step(grid);
            grid.swap();
        }
        self.state = LoopState::Done;
        Ok(())
    }
}
