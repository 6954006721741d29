// ─────────────────────────────────────────────────────────────────────
// Toroidal Life — Halo Exchange
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Per-step boundary row exchange with the two ring-adjacent workers.
//!
//! Each worker holds one `RingLink`: capacity-1 channels to and from
//! its up- and down-neighbor. An exchange is two phases, and each
//! phase is one paired operation — the buffered send is issued before
//! the blocking receive, so every worker's phase completes without an
//! ordering deadlock for any ring size >= 2. A single worker is its
//! own neighbor in both directions and never gets channels at all.

use std::sync::mpsc::{sync_channel, Receiver, SyncSender};

use life_types::error::{LifeError, LifeResult};

use crate::grid::LocalGrid;

/// A row in flight between ring neighbors.
pub type HaloRow = Vec<u8>;

/// One worker's connection to the ring.
pub enum RingLink {
    /// Single-worker torus: ghost rows wrap onto the worker's own
    /// boundary rows. First-class branch, no self-send through
    /// channels.
    SelfWrap,
    /// Channels to and from the two ring neighbors.
    Wired {
        to_up: SyncSender<HaloRow>,
        from_up: Receiver<HaloRow>,
        to_down: SyncSender<HaloRow>,
        from_down: Receiver<HaloRow>,
    },
}

impl RingLink {
    /// Build the links for every rank of a `workers`-sized ring, in
    /// rank order.
    ///
    /// Channels have capacity 1: each carries exactly one boundary row
    /// per step, and the buffer slot is what lets both endpoints issue
    /// their send before either blocks on the matching receive.
    pub fn ring(workers: usize) -> LifeResult<Vec<RingLink>> {
        if workers == 0 {
            return Err(LifeError::Config(
                "ring requires at least one worker".to_string(),
            ));
        }
        if workers == 1 {
            return Ok(vec![RingLink::SelfWrap]);
        }

        // downward[i]: rank i sends its last row to (i + 1) % workers.
        // upward[i]:   rank i sends its first row to (i - 1) % workers.
        let (down_tx, mut down_rx): (Vec<_>, Vec<_>) =
            (0..workers).map(|_| sync_channel::<HaloRow>(1)).unzip();
        let (up_tx, mut up_rx): (Vec<_>, Vec<_>) =
            (0..workers).map(|_| sync_channel::<HaloRow>(1)).unzip();

        // Rank i receives from-up on its up-neighbor's downward channel
        // and from-down on its down-neighbor's upward channel.
        down_rx.rotate_right(1);
        up_rx.rotate_left(1);

        let links = down_tx
            .into_iter()
            .zip(up_tx)
            .zip(down_rx.into_iter().zip(up_rx))
            .map(|((to_down, to_up), (from_up, from_down))| RingLink::Wired {
                to_up,
                from_up,
                to_down,
                from_down,
            })
            .collect();
        Ok(links)
    }

    /// Refresh both ghost rows from the neighbors' authoritative
    /// boundary rows, sending this worker's own boundary rows outward.
    ///
    /// Phase A shifts rows upward: own row 1 goes up, the
    /// down-neighbor's first row lands in the bottom ghost row.
    /// Phase B shifts rows downward: own last row goes down, the
    /// up-neighbor's last row lands in ghost row 0.
    pub fn exchange(&mut self, grid: &mut LocalGrid) -> LifeResult<()> {
        match self {
            RingLink::SelfWrap => {
                grid.self_wrap();
                Ok(())
            }
            RingLink::Wired {
                to_up,
                from_up,
                to_down,
                from_down,
            } => {
                to_up
                    .send(grid.first_interior_row())
                    .map_err(|_| dropped_neighbor("up"))?;
                let from_below = from_down
                    .recv()
                    .map_err(|_| dropped_neighbor("down"))?;
                grid.set_ghost_bottom(&from_below)?;

                to_down
                    .send(grid.last_interior_row())
                    .map_err(|_| dropped_neighbor("down"))?;
                let from_above = from_up
                    .recv()
                    .map_err(|_| dropped_neighbor("up"))?;
                grid.set_ghost_top(&from_above)?;
                Ok(())
            }
        }
    }
}

fn dropped_neighbor(direction: &str) -> LifeError {
    LifeError::Communication(format!(
        "{direction}-neighbor hung up mid-exchange; aborting the run"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::thread;

    #[test]
    fn test_single_worker_ring_is_self_wrap() {
        let mut links = RingLink::ring(1).unwrap();
        assert_eq!(links.len(), 1);
        let mut grid = LocalGrid::new(2, 3).unwrap();
        grid.load_interior(array![[1u8, 0, 1], [0, 1, 0]].view())
            .unwrap();
        links[0].exchange(&mut grid).unwrap();
        assert_eq!(grid.row(0).to_vec(), vec![0, 1, 0]);
        assert_eq!(grid.row(3).to_vec(), vec![1, 0, 1]);
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(RingLink::ring(0).is_err());
    }

    #[test]
    fn test_two_worker_exchange_fills_ghost_rows() {
        // rows = 4, two workers with 2 rows each. After one exchange,
        // each ghost row must equal the neighbor's pre-update boundary
        // row, on both the wrapped and unwrapped seams.
        let links = RingLink::ring(2).unwrap();
        let bands = [
            array![[1u8, 1, 0, 0], [0, 1, 0, 1]],
            array![[1u8, 0, 1, 0], [0, 0, 1, 1]],
        ];

        let handles: Vec<_> = links
            .into_iter()
            .zip(bands)
            .map(|(mut link, band)| {
                thread::spawn(move || {
                    let mut grid = LocalGrid::new(2, 4).unwrap();
                    grid.load_interior(band.view()).unwrap();
                    link.exchange(&mut grid).unwrap();
                    (grid.row(0).to_vec(), grid.row(3).to_vec())
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        // Worker 0: up-neighbor is worker 1 (wrap), down-neighbor is 1.
        assert_eq!(results[0].0, vec![0, 0, 1, 1]); // worker 1's last row
        assert_eq!(results[0].1, vec![1, 0, 1, 0]); // worker 1's first row
        // Worker 1: up-neighbor is worker 0, down-neighbor is 0 (wrap).
        assert_eq!(results[1].0, vec![0, 1, 0, 1]); // worker 0's last row
        assert_eq!(results[1].1, vec![1, 1, 0, 0]); // worker 0's first row
    }

    #[test]
    fn test_three_worker_ring_routes_both_directions() {
        // Each worker owns one row tagged with a one-hot rank marker.
        // Repeated exchanges must keep routing the up-neighbor's row
        // into ghost row 0 and the down-neighbor's into the bottom one.
        let links = RingLink::ring(3).unwrap();
        let handles: Vec<_> = links
            .into_iter()
            .enumerate()
            .map(|(rank, mut link)| {
                thread::spawn(move || {
                    let mut grid = LocalGrid::new(1, 3).unwrap();
                    let mut tag = array![[0u8, 0, 0]];
                    tag[[0, rank]] = 1;
                    grid.load_interior(tag.view()).unwrap();
                    for _ in 0..3 {
                        link.exchange(&mut grid).unwrap();
                        assert_eq!(grid.get(0, (rank + 2) % 3), 1, "up-neighbor tag");
                        assert_eq!(grid.get(2, (rank + 1) % 3), 1, "down-neighbor tag");
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
    }

    #[test]
    fn test_dropped_neighbor_is_a_communication_error() {
        let mut links = RingLink::ring(2).unwrap();
        // Drop worker 1's link entirely; worker 0's exchange must fail
        // rather than block forever or return stale data.
        links.remove(1);
        let mut grid = LocalGrid::new(2, 2).unwrap();
        let err = links[0].exchange(&mut grid).unwrap_err();
        match err {
            LifeError::Communication(msg) => assert!(msg.contains("hung up")),
            other => panic!("Unexpected error: {other:?}"),
        }
    }
}
