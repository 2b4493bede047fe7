//! # Grid Allocator
//!
//! Finds where a newly created widget goes. The canvas is read as an
//! implicit grid: cells of `cell_size` separated by `padding`, starting below
//! the title strip. Existing widgets mark the cells they cover, then the
//! allocator scans row-major for the first origin whose whole span is free.
//!
//! The scan always starts from scratch, so the result depends only on the
//! current widget set: deleting a widget frees its cells for the next
//! creation, and nothing is compacted.

use std::collections::HashSet;

use crate::config::LayoutConfig;
use crate::layout::geometry::overlaps;
use crate::model::{Point, Rect, Widget};

/// Number of grid columns that fit in `canvas_width`. At least one.
pub fn grid_columns(canvas_width: f64, config: &LayoutConfig) -> usize {
    let columns = ((canvas_width - config.padding) / config.pitch()).floor();
    if columns.is_finite() && columns >= 1.0 {
        columns as usize
    } else {
        1
    }
}

/// Pixel origin of the cell at (`row`, `col`).
pub fn cell_origin(row: usize, col: usize, config: &LayoutConfig) -> Point {
    Point::new(
        config.min_x() + col as f64 * config.pitch(),
        config.min_y() + row as f64 * config.pitch(),
    )
}

fn cell_rect(row: usize, col: usize, config: &LayoutConfig) -> Rect {
    let origin = cell_origin(row, col, config);
    Rect::new(origin.x, origin.y, config.cell_size, config.cell_size)
}

/// Occupied `(row, col)` cells: those some widget sits closer than
/// `padding` to. Only cells near a widget are visited, so the cost follows
/// the widget count rather than the canvas size.
///
/// A widget that was never dragged covers exactly its preset span. One that
/// was dragged off the grid marks every cell it straddles.
fn occupancy(
    existing: &[Widget],
    num_columns: usize,
    num_rows: usize,
    config: &LayoutConfig,
) -> HashSet<(usize, usize)> {
    let mut occupied = HashSet::new();
    let pitch = config.pitch();
    let margin = config.collision_margin();

    for widget in existing {
        let rect = widget.rect();

        let col_lo = ((rect.x - config.padding - config.min_x()) / pitch).floor();
        let col_hi = ((rect.right() + config.padding - config.min_x()) / pitch).floor();
        let row_lo = ((rect.y - config.padding - config.min_y()) / pitch).floor();
        let row_hi = ((rect.bottom() + config.padding - config.min_y()) / pitch).floor();

        if !(col_hi >= 0.0 && row_hi >= 0.0) {
            continue;
        }
        let col_lo = col_lo.max(0.0) as usize;
        let row_lo = row_lo.max(0.0) as usize;
        let col_hi = (col_hi as usize).min(num_columns - 1);
        let row_hi = (row_hi as usize).min(num_rows.saturating_sub(1));

        for r in row_lo..=row_hi {
            for c in col_lo..=col_hi {
                if overlaps(cell_rect(r, c, config), rect, margin) {
                    occupied.insert((r, c));
                }
            }
        }
    }

    occupied
}

/// Pixel origin for a new widget spanning `span_cols × span_rows` cells.
///
/// Fills a row left to right, then wraps to the next one. If nothing is free
/// within `max_scan_rows` rows the first cell is returned anyway; the widget
/// may then overlap and the user moves it.
pub fn next_free_position(
    span_cols: u32,
    span_rows: u32,
    existing: &[Widget],
    canvas_width: f64,
    config: &LayoutConfig,
) -> Point {
    let num_columns = grid_columns(canvas_width, config);
    let span_cols = span_cols.max(1) as usize;
    let span_rows = span_rows.max(1) as usize;
    let scan_rows = config.max_scan_rows as usize;

    if span_cols <= num_columns {
        let occupied = occupancy(existing, num_columns, scan_rows + span_rows, config);

        for row in 0..scan_rows {
            for col in 0..=(num_columns - span_cols) {
                let free = (row..row + span_rows).all(|r| {
                    (col..col + span_cols).all(|c| !occupied.contains(&(r, c)))
                });
                if free {
                    tracing::trace!(
                        target: "dashlay::grid",
                        row,
                        col,
                        span_cols,
                        span_rows,
                        "found free grid slot"
                    );
                    return cell_origin(row, col, config);
                }
            }
        }
    }

    tracing::warn!(
        target: "dashlay::grid",
        span_cols,
        span_rows,
        num_columns,
        widgets = existing.len(),
        "no free grid slot, falling back to the first cell"
    );
    cell_origin(0, 0, config)
}
