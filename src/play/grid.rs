//! ASCII grid rendering.

use std::fmt::Write;

use crate::core::config::GRID_WIDTH;
use crate::core::safe::Grid;

/// Characters inside each cell, not counting the `|` borders.
pub const CELL_WIDTH: usize = 5;

/// Horizontal rule between rows.
#[must_use]
pub fn separator() -> String {
    "-".repeat(GRID_WIDTH * (CELL_WIDTH + 1) + 1)
}

/// Render the board as a 3×3 table.
///
/// Unopened safes show their 1-based number, opened ones their multiplier.
///
/// ```
/// use safe_cracker::core::GameRng;
/// use safe_cracker::play::grid::render_grid;
/// use safe_cracker::rules::RoundEngine;
///
/// let engine = RoundEngine::new(10, GameRng::new(1)).unwrap();
/// let text = render_grid(&engine.describe_grid());
/// assert!(text.starts_with("-------------------\n|  1  |  2  |  3  |\n"));
/// ```
#[must_use]
pub fn render_grid(grid: &Grid) -> String {
    let rule = separator();
    let mut out = String::new();

    out.push_str(&rule);
    out.push('\n');
    for row in grid.chunks(GRID_WIDTH) {
        for cell in row {
            // Cell's Display ignores width flags, so pad the rendered label.
            let _ = write!(out, "|{:^width$}", cell.to_string(), width = CELL_WIDTH);
        }
        out.push_str("|\n");
        out.push_str(&rule);
        out.push('\n');
    }

    out
}
