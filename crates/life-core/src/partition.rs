// ─────────────────────────────────────────────────────────────────────
// Toroidal Life — Row Partitioning
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Static row-band decomposition of the global grid across workers.
//!
//! Bands are contiguous and non-overlapping; in rank order they cover
//! every global row exactly once, and no two bands differ in size by
//! more than one row.

use life_types::error::{LifeError, LifeResult};

/// One worker's band of global rows, plus its position in the ring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowPartition {
    pub rank: usize,
    pub workers: usize,
    pub global_rows: usize,
    /// Rows this worker owns (authoritative, ghost rows excluded).
    pub local_rows: usize,
    /// Global index of this worker's first owned row.
    pub row_offset: usize,
}

impl RowPartition {
    /// Compute rank's band: `rows / workers` rows each, with the
    /// remainder distributed one row apiece to the lowest ranks.
    ///
    /// A worker count exceeding the row count would leave some worker
    /// with zero rows; that is rejected here rather than silently
    /// producing an empty band.
    pub fn new(global_rows: usize, workers: usize, rank: usize) -> LifeResult<Self> {
        if global_rows == 0 {
            return Err(LifeError::Config(
                "partition requires at least one global row".to_string(),
            ));
        }
        if workers == 0 {
            return Err(LifeError::Config(
                "partition requires at least one worker".to_string(),
            ));
        }
        if rank >= workers {
            return Err(LifeError::Config(format!(
                "rank {rank} out of range for {workers} workers"
            )));
        }
        if workers > global_rows {
            return Err(LifeError::Config(format!(
                "cannot partition {global_rows} rows across {workers} workers: \
                 a worker would own zero rows"
            )));
        }

        let base = global_rows / workers;
        let rem = global_rows % workers;
        let local_rows = base + usize::from(rank < rem);
        let row_offset = rank * base + rank.min(rem);

        Ok(RowPartition {
            rank,
            workers,
            global_rows,
            local_rows,
            row_offset,
        })
    }

    /// Rank of the logical up-neighbor (toroidal: rank 0 wraps to the
    /// last worker).
    pub fn up_neighbor(&self) -> usize {
        (self.rank + self.workers - 1) % self.workers
    }

    /// Rank of the logical down-neighbor.
    pub fn down_neighbor(&self) -> usize {
        (self.rank + 1) % self.workers
    }

    /// Exclusive end of this band in global row indexing.
    pub fn row_end(&self) -> usize {
        self.row_offset + self.local_rows
    }
}

/// Bands for every rank, in rank order.
pub fn partition_table(global_rows: usize, workers: usize) -> LifeResult<Vec<RowPartition>> {
    (0..workers)
        .map(|rank| RowPartition::new(global_rows, workers, rank))
        .collect()
}
