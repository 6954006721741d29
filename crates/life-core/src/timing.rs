// ─────────────────────────────────────────────────────────────────────
// Toroidal Life — Timing Coordinator
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Synchronized wall-clock measurement across the ring.
//!
//! Every worker waits at a shared barrier, times its own loop, then
//! contributes the duration to a max-reduction. Only the root rank
//! sees the reduced value: the time experienced by the slowest worker,
//! which bounds the latency of the whole run.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Barrier};
use std::time::Instant;

use life_types::error::{LifeError, LifeResult};

/// Rank that drains the reduction and reports the summary.
pub const ROOT_RANK: usize = 0;

/// One worker's handle on the shared start barrier and the reduction.
pub struct TimingCoordinator {
    workers: usize,
    barrier: Arc<Barrier>,
    collector: Sender<f64>,
    /// Only the root rank holds the reduction inbox.
    inbox: Option<Receiver<f64>>,
}

impl TimingCoordinator {
    /// Coordinators for every rank, in rank order. Rank [`ROOT_RANK`]
    /// receives the reduction inbox.
    pub fn for_ring(workers: usize) -> Vec<TimingCoordinator> {
        let barrier = Arc::new(Barrier::new(workers));
        let (collector, inbox) = channel();
        let mut inbox = Some(inbox);
        (0..workers)
            .map(|rank| TimingCoordinator {
                workers,
                barrier: Arc::clone(&barrier),
                collector: collector.clone(),
                inbox: if rank == ROOT_RANK { inbox.take() } else { None },
            })
            .collect()
    }

    /// Block until every worker is ready, then start this worker's
    /// clock.
    pub fn start(&self) -> Instant {
        self.barrier.wait();
        Instant::now()
    }

    /// Contribute this worker's elapsed time; the root rank drains all
    /// contributions and returns the maximum, everyone else `None`.
    pub fn finish(&self, started: Instant) -> LifeResult<Option<f64>> {
        let local_elapsed = started.elapsed().as_secs_f64();
        self.collector.send(local_elapsed).map_err(|_| {
            LifeError::Communication("timing reduction channel closed".to_string())
        })?;
        match &self.inbox {
            None => Ok(None),
            Some(inbox) => {
                let mut max = 0.0f64;
                for _ in 0..self.workers {
                    let elapsed = inbox.recv().map_err(|_| {
                        LifeError::Communication(
                            "a worker exited before contributing its duration".to_string(),
                        )
                    })?;
                    max = max.max(elapsed);
                }
                Ok(Some(max))
            }
        }
    }
}
