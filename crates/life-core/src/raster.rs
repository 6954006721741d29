// ─────────────────────────────────────────────────────────────────────
// Toroidal Life — Raster Export
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Two-tone PGM (ASCII P2) export of a gathered grid. One-shot
//! collective output layered on top of the core; never part of the
//! per-step loop.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ndarray::ArrayView2;

use life_types::error::LifeResult;

/// Serialize the grid as ASCII PGM: live cells black (0), dead cells
/// white (255), one raster line per grid row.
pub fn write_pgm<W: Write>(grid: ArrayView2<u8>, out: &mut W) -> LifeResult<()> {
    let (rows, cols) = grid.dim();
    writeln!(out, "P2")?;
    writeln!(out, "{cols} {rows}")?;
    writeln!(out, "255")?;
    for row in grid.rows() {
        for &cell in row {
            let tone: u8 = if cell != 0 { 0 } else { 255 };
            write!(out, "{tone} ")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write the grid to a PGM file at `path`.
pub fn save_pgm(grid: ArrayView2<u8>, path: &Path) -> LifeResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_pgm(grid, &mut writer)?;
    writer.flush()?;
    Ok(())
}
